use std::path::PathBuf;

use super::metrics::EnrichedRepository;
use crate::error::{Result, SnapshotError};
use crate::github::FetchFailure;

/// A fetched repository left out of the output because a field the metrics
/// need was missing or unparseable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub repository: String,
    pub reason: String,
}

impl From<SnapshotError> for RejectedRecord {
    fn from(err: SnapshotError) -> Self {
        let repository = match &err {
            SnapshotError::MalformedRecord { repository, .. } => repository.clone(),
            _ => String::new(),
        };
        Self {
            repository,
            reason: err.to_string(),
        }
    }
}

/// Counts at each stage of a completed run, plus what was produced.
#[derive(Debug)]
pub struct RunReport {
    pub listed: usize,
    pub failures: Vec<FetchFailure>,
    pub rejected: Vec<RejectedRecord>,
    pub records: Vec<EnrichedRepository>,
    pub output_path: PathBuf,
    pub cancelled: bool,
}

impl RunReport {
    pub fn fetched(&self) -> usize {
        self.records.len() + self.rejected.len()
    }

    pub fn render_summary(&self) -> String {
        let rule = "=".repeat(80);
        let mut out = String::new();

        out.push_str(&format!("{}\n", rule));
        out.push_str(&format!("Repositories listed:  {}\n", self.listed));
        out.push_str(&format!("Details fetched:      {}\n", self.fetched()));
        out.push_str(&format!("Failed fetches:       {}\n", self.failures.len()));
        for failure in &self.failures {
            let status = failure
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "  - {} (status {}): {}\n",
                failure.full_name(),
                status,
                failure.reason
            ));
        }
        out.push_str(&format!("Malformed records:    {}\n", self.rejected.len()));
        for rejected in &self.rejected {
            out.push_str(&format!("  - {}\n", rejected.reason));
        }
        if self.cancelled {
            out.push_str("Run was cancelled before all details were fetched\n");
        }
        out.push_str(&format!(
            "Analysis complete: {} repositories processed\n",
            self.records.len()
        ));
        out.push_str(&format!("Results saved to: {}\n", self.output_path.display()));
        out.push_str(&rule);
        out
    }

    /// Every record as numbered pretty JSON.
    pub fn render_records(&self) -> Result<String> {
        let mut out = String::new();
        for (i, record) in self.records.iter().enumerate() {
            out.push_str(&format!(
                "\n{}: {}\n",
                i + 1,
                serde_json::to_string_pretty(record)?
            ));
        }
        Ok(out)
    }
}
