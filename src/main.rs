//! rustpubmed - PubMed abstract harvester
//!
//! Searches PubMed through E-utilities, pages through every hit as plaintext
//! abstracts, and splits them into complete and partial CSV tables.
//!
//! ## Usage
//!
//! ```bash
//! rustpubmed "zebrafish heart regeneration" --page-size 200
//! rustpubmed            # prompts for the search term
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use rustpubmed::{
    client::EutilsClient,
    config::{delay_from_secs, EutilsConfig, DEFAULT_BASE_URL, MAX_PAGE_SIZE},
    output,
    pipeline,
    segment::DelimiterSegmenter,
};
use std::future::Future;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// PubMed abstract harvester
#[derive(Parser)]
#[command(name = "rustpubmed")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Search term (prompted for when omitted)
    term: Option<String>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Records per EFetch call (1-500)
    #[arg(long, default_value_t = MAX_PAGE_SIZE)]
    page_size: usize,

    /// Seconds to wait between EFetch calls
    #[arg(long, default_value_t = 2.0)]
    delay_secs: f64,

    /// E-utilities base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Entrez database
    #[arg(long, default_value = "pubmed")]
    database: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    let term = match cli.term.clone() {
        Some(term) => term,
        None => prompt_for_term()?,
    };
    let term = term.trim().to_string();
    if term.is_empty() {
        anyhow::bail!("Search term must not be empty");
    }

    tokio::select! {
        result = run_harvest(&cli, &term) => result,
        _ = interrupted(tokio::signal::ctrl_c()) => {
            error!("Interrupted, no output written");
            anyhow::bail!("Cancelled by user")
        }
    }
}

/// Resolve once the interrupt signal arrives.
///
/// If the handler cannot be installed the run continues uninterruptible
/// rather than being reported as cancelled.
async fn interrupted<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => {}
        Err(e) => {
            warn!(error = %e, "Failed to install Ctrl-C handler, cancellation disabled");
            std::future::pending::<()>().await;
        }
    }
}

/// Read one line from stdin
fn prompt_for_term() -> Result<String> {
    print!("Enter search term: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read search term")?;
    Ok(input)
}

// ============================================================================
// Harvest
// ============================================================================

async fn run_harvest(cli: &Cli, term: &str) -> Result<()> {
    let delay = match delay_from_secs(cli.delay_secs) {
        Ok(delay) => delay,
        Err(e) => anyhow::bail!("--delay-secs must be a non-negative number of seconds: {}", e),
    };

    let config = EutilsConfig::default()
        .with_base_url(&cli.base_url)
        .with_database(&cli.database)
        .with_page_size(cli.page_size)
        .with_delay(delay);

    info!(term = term, page_size = config.page_size, "Starting harvest");

    let client = EutilsClient::new(config)?;

    println!("\n--- Searching PubMed for \"{}\" ---", term);
    let outcome = pipeline::run(&client, term, &DelimiterSegmenter)
        .await
        .context("Harvest failed")?;

    println!(
        "Retrieved {} records ({} reported) in {} calls.",
        outcome.records.len(),
        outcome.session.total_count,
        outcome.retrieval_calls
    );
    println!(
        "Complete: {}, partial: {}",
        outcome.table.complete.len(),
        outcome.table.partial.len()
    );

    let files = output::write_outcome(&cli.output, term, &outcome)
        .context("Failed to write output")?;

    println!("Saved: {}", files.complete.display());
    println!("Saved: {}", files.partial.display());
    println!("Saved: {}", files.summary.display());
    println!("\n✓ Harvest complete.");
    Ok(())
}
