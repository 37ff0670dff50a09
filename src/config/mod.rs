//! Run settings: built-in defaults, an optional TOML file, then command line
//! and environment overrides. Built once in `main` and passed by reference.

pub mod types;

use std::path::Path;
use std::time::Duration;

use crate::error::{Result, SnapshotError};

pub use types::{FetchConfig, GithubConfig, OutputConfig, Overrides, Settings};

impl Settings {
    /// Defaults, replaced section by section by the file at `path` if given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                let settings = toml::from_str(&content)?;
                tracing::debug!(path = %path.display(), "loaded config file");
                Ok(settings)
            }
            None => Ok(Settings::default()),
        }
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(token) = overrides.token {
            self.github.token = Some(token);
        }
        if let Some(endpoint) = overrides.endpoint {
            self.github.endpoint = endpoint;
        }
        if let Some(count) = overrides.count {
            self.fetch.count = count;
        }
        if let Some(delay) = overrides.rate_limit_delay_ms {
            self.fetch.rate_limit_delay_ms = delay;
        }
        if let Some(path) = overrides.output_path {
            self.output.path = Some(path);
        }
        if let Some(dir) = overrides.output_dir {
            self.output.dir = dir;
        }
        if overrides.no_display {
            self.output.display_records = false;
        }
        self
    }

    /// Fails before any network call when the credential is missing.
    pub fn validate(&self) -> Result<()> {
        self.token()?;
        if self.github.endpoint.trim().is_empty() {
            return Err(SnapshotError::Configuration(
                "GitHub endpoint must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn token(&self) -> Result<&str> {
        match self.github.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(SnapshotError::Configuration(
                "GITHUB_TOKEN not found in environment variables".to_string(),
            )),
        }
    }

    pub fn rate_limit_delay(&self) -> Duration {
        Duration::from_millis(self.fetch.rate_limit_delay_ms)
    }
}
