use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use super::metrics::MetricsCalculator;
use super::report::{RejectedRecord, RunReport};
use super::sink::JsonFileSink;
use crate::config::Settings;
use crate::error::Result;
use crate::github::GitHubClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    ListFetch,
    DetailFetch,
    Enrich,
    Persist,
    Report,
    Done,
    Aborted,
}

/// Runs list fetch, detail fetch, enrichment, persistence and reporting in
/// that order. Failed detail fetches and malformed records are reported and
/// left out; any other failure aborts the run.
pub struct Orchestrator<'a> {
    settings: &'a Settings,
    cancel: CancellationToken,
}

impl<'a> Orchestrator<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub async fn run(&self) -> Result<RunReport> {
        let mut stage = Stage::Init;
        match self.execute(&mut stage).await {
            Ok(report) => {
                advance(&mut stage, Stage::Done);
                Ok(report)
            }
            Err(e) => {
                error!(stage = ?stage, "run aborted: {}", e);
                advance(&mut stage, Stage::Aborted);
                Err(e)
            }
        }
    }

    async fn execute(&self, stage: &mut Stage) -> Result<RunReport> {
        self.settings.validate()?;
        let client = GitHubClient::new(self.settings)?;

        advance(stage, Stage::ListFetch);
        println!("Step 1: Fetching list of top repositories...");
        let summaries = client
            .fetch_top_repositories(self.settings.fetch.count)
            .await?;
        println!("Found {} repositories\n", summaries.len());

        advance(stage, Stage::DetailFetch);
        println!("Step 2: Fetching detailed data for each repository...");
        let batch = client.fetch_all_details(&summaries, &self.cancel).await;
        println!(
            "\nSuccessfully fetched details for {} repositories ({} failed)\n",
            batch.details.len(),
            batch.failures.len()
        );

        advance(stage, Stage::Enrich);
        println!("Step 3: Processing data and calculating metrics...");
        let (records, malformed) = MetricsCalculator::enrich_each(batch.details, Utc::now());
        let rejected: Vec<RejectedRecord> = malformed
            .into_iter()
            .map(|e| {
                println!("Skipping malformed record: {}", e);
                warn!("skipping malformed record: {}", e);
                RejectedRecord::from(e)
            })
            .collect();
        println!(
            "Processed {} repositories ({} malformed)\n",
            records.len(),
            rejected.len()
        );

        advance(stage, Stage::Persist);
        println!("Step 4: Saving results to file...");
        let output_path = JsonFileSink::new(&self.settings.output).write(&records)?;
        println!("Data saved to: {}\n", output_path.display());

        advance(stage, Stage::Report);
        let report = RunReport {
            listed: summaries.len(),
            failures: batch.failures,
            rejected,
            records,
            output_path,
            cancelled: batch.cancelled,
        };
        if self.settings.output.display_records {
            println!("{}", "=".repeat(80));
            println!("RESULTS");
            println!("{}", report.render_records()?);
        }
        println!("{}", report.render_summary());

        Ok(report)
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!(from = ?*stage, to = ?next, "pipeline stage");
    *stage = next;
}
