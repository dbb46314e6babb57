//! Plethora CLI: search, scrape, and emit one research session as JSON.
//!
//! ```text
//! plethora "rust web frameworks" --level high --results 8 --subpages 3
//! ```

use anyhow::{Context, Result};
use clap::Parser;

use plethora::{DetailLevel, EngineConfig, ResearchEngine, SessionOptions};

#[derive(Parser, Debug)]
#[command(name = "plethora")]
#[command(about = "Search the web and scrape result pages into structured records", long_about = None)]
struct Args {
    /// Search query string
    query: String,

    /// Detail level: low (results only), medium (+ page extraction),
    /// high (+ sub-page extraction)
    #[arg(short, long, default_value = "medium")]
    level: DetailLevel,

    /// Number of search results to process
    #[arg(short = 'n', long = "results", default_value_t = 5)]
    num_results: usize,

    /// Max sub-pages per site at high detail
    #[arg(short = 's', long, default_value_t = 2)]
    subpages: usize,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = 15)]
    timeout: u64,

    /// Route requests through a relay; the target URL is appended
    /// percent-encoded to this prefix
    #[arg(long)]
    relay: Option<String>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut builder = EngineConfig::builder().fetch_timeout_secs(args.timeout);
    if let Some(relay) = &args.relay {
        builder = builder.relay_prefix(relay);
    }
    let config = builder.build().context("invalid engine configuration")?;

    let engine = ResearchEngine::new(config).context("failed to build research engine")?;
    let options = SessionOptions {
        num_results: args.num_results,
        max_subpages: args.subpages,
    };

    let session = engine.run_session(&args.query, args.level, options).await;

    if session.results.is_empty() {
        eprintln!("No results found. Try a different query.");
        std::process::exit(1);
    }

    let json = if args.compact {
        serde_json::to_string(&session)?
    } else {
        serde_json::to_string_pretty(&session)?
    };
    println!("{json}");

    Ok(())
}
