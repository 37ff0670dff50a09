use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use top_repos_snapshot::config::{Overrides, Settings};
use top_repos_snapshot::github::queries::MAX_SEARCH_PAGE;
use top_repos_snapshot::pipeline::Orchestrator;

#[derive(Parser)]
#[command(name = "top-repos-snapshot")]
#[command(about = "Snapshot age, staleness and issue metrics of the most-starred GitHub repositories")]
struct Cli {
    /// GitHub token (can also be set via GITHUB_TOKEN env var or a .env file)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// TOML config file
    #[arg(short, long, env = "SNAPSHOT_CONFIG")]
    config: Option<PathBuf>,

    /// GraphQL endpoint
    #[arg(long, env = "GITHUB_GRAPHQL_URL")]
    endpoint: Option<String>,

    /// Number of repositories to request (values above 100 are clamped to 100)
    #[arg(short = 'n', long)]
    count: Option<u32>,

    /// Pause after each detail request, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Output file path (timestamped file under --output-dir if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for timestamped output files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Only print the summary, not every record
    #[arg(long)]
    no_display: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())?.apply(Overrides {
        token: cli.token,
        endpoint: cli.endpoint,
        count: cli.count,
        rate_limit_delay_ms: cli.delay_ms,
        output_path: cli.output,
        output_dir: cli.output_dir,
        no_display: cli.no_display,
    });

    println!("Starting GitHub repository analysis...");
    println!(
        "Fetching top {} repositories\n",
        settings.fetch.count.min(MAX_SEARCH_PAGE)
    );

    // Ctrl-C stops the detail loop before the next repository
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping after the current repository");
            on_interrupt.cancel();
        }
    });

    Orchestrator::new(&settings)
        .with_cancellation(cancel)
        .run()
        .await?;

    Ok(())
}
