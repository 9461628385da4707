//! Process entry point: run the full catalog once, write the analysis,
//! print a human-readable summary.

use std::cmp::Reverse;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use itertools::Itertools;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use cbdc_harvester::analyze::analyze;
use cbdc_harvester::catalog::QueryCatalog;
use cbdc_harvester::cli::Cli;
use cbdc_harvester::download::Downloader;
use cbdc_harvester::models::AnalysisSummary;
use cbdc_harvester::outputs::json::write_analysis;
use cbdc_harvester::run::{RunConfig, run_catalog};
use cbdc_harvester::search::SearchClient;
use cbdc_harvester::utils::prepare_output_dirs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("cbdc_harvester starting up");

    let args = Cli::parse();
    debug!(?args.output_dir, args.max_results, "Parsed CLI arguments");

    let catalog = QueryCatalog::cbdc();
    let config = RunConfig {
        output_dir: PathBuf::from(&args.output_dir),
        max_results_per_query: args.max_results,
        page_pause_secs: RunConfig::DEFAULT_PAGE_PAUSE,
    };

    // Early check: the output tree must be writable before any query runs.
    if let Err(e) = prepare_output_dirs(&config.output_dir, &catalog).await {
        error!(
            path = %config.output_dir.display(),
            error = %e,
            "Output directory is not usable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let timeout = Duration::from_secs(args.http_timeout_secs);
    let search = SearchClient::new(args.api_key, args.cse_id, timeout)?;
    let downloader = Downloader::new(timeout)?;

    let table = run_catalog(&config, &catalog, &search, &downloader).await;
    let summary = analyze(&table);
    write_analysis(&summary, &config.output_dir).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        total_results = summary.total_results,
        "Execution complete"
    );

    print_summary(&summary);
    Ok(())
}

/// Human-readable completion summary on stdout, count-descending like the
/// historical printout.
fn print_summary(summary: &AnalysisSummary) {
    println!();
    println!(
        "Scraping completed at {}!",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("Total results: {}", summary.total_results);

    println!("\nResults by category:");
    for (category, count) in summary
        .results_by_category
        .iter()
        .sorted_by_key(|(name, count)| (Reverse(**count), name.to_string()))
    {
        println!("  {category}: {count}");
    }

    println!("\nTop sources:");
    for (source, count) in summary
        .results_by_source
        .iter()
        .sorted_by_key(|(name, count)| (Reverse(**count), name.to_string()))
    {
        println!("  {source}: {count}");
    }
}
