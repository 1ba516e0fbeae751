mod charts;
mod entities;
mod extract;
mod fetch;
mod models;
mod orchestrator;
mod report;
mod sentiment;
mod tally;
mod wordfreq;

use anyhow::Result;
use clap::Parser;
use orchestrator::run_pipeline;
use tracing::info;

/// Transcript Vibes - fan-wiki transcript scraper and dialogue analyzer
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Output directory for raw pages, records, and analysis artifacts
    #[arg(short, long, default_value = "strangerthings")]
    output_dir: String,

    /// Pause between successive page fetches, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    info!("Starting transcript_vibes");

    let args = Args::parse();
    run_pipeline(&args.output_dir, args.delay_ms).await
}
