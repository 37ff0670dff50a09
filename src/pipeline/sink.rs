use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

use super::metrics::EnrichedRepository;
use crate::config::OutputConfig;
use crate::error::Result;

/// Writes the enriched records as one pretty-printed JSON array.
pub struct JsonFileSink {
    dir: PathBuf,
    path: Option<PathBuf>,
}

impl JsonFileSink {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            path: config.path.clone(),
        }
    }

    pub fn default_file_name(at: DateTime<Local>) -> String {
        format!("repositories_{}.json", at.format("%Y%m%d_%H%M%S"))
    }

    pub fn target_path(&self, at: DateTime<Local>) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => self.dir.join(Self::default_file_name(at)),
        }
    }

    /// Creates missing parent directories and returns the written path.
    pub fn write(&self, records: &[EnrichedRepository]) -> Result<PathBuf> {
        let path = self.target_path(Local::now());
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(records)?;
        std::fs::write(&path, content)?;
        tracing::debug!(path = %path.display(), records = records.len(), "snapshot written");

        Ok(path)
    }

    pub fn read(path: &Path) -> Result<Vec<EnrichedRepository>> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
