//! Error types shared by the client, the metrics calculator and the pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SnapshotError>;

#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Settings are unusable, e.g. no token was provided.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The endpoint answered with a non-success status.
    #[error("Request failed with status {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A 2xx response whose GraphQL envelope carried errors and no data.
    #[error("GraphQL error: {}", .messages.join("; "))]
    GraphQl { messages: Vec<String> },

    #[error("Repository not found: {owner}/{name}")]
    RepositoryNotFound { owner: String, name: String },

    /// A fetched record lacks a field the metrics need, or it cannot be parsed.
    #[error("Malformed record {repository}: missing or invalid field `{field}`")]
    MalformedRecord { repository: String, field: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),
}

impl SnapshotError {
    pub fn malformed(repository: impl Into<String>, field: &'static str) -> Self {
        Self::MalformedRecord {
            repository: repository.into(),
            field,
        }
    }

    /// HTTP status of a transport failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
