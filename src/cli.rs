//! Command-line interface definitions for the CBDC harvester.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Credentials can be provided via command-line flags or environment
//! variables.

use clap::Parser;

/// Command-line arguments for the CBDC harvester.
///
/// One invocation runs the full built-in query catalog once and writes the
/// result tables, the downloaded documents, and the analysis file under the
/// output directory.
///
/// # Examples
///
/// ```sh
/// # Credentials from the environment
/// export GOOGLE_API_KEY=...
/// export GOOGLE_CSE_ID=...
/// cbdc_harvester -o ./cbdc_data
///
/// # Everything on the command line, smaller per-query ceiling
/// cbdc_harvester --api-key KEY --cse-id CX --max-results 10
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Google Custom Search API key
    #[arg(long, env = "GOOGLE_API_KEY")]
    pub api_key: String,

    /// Google Custom Search Engine identifier (cx)
    #[arg(long, env = "GOOGLE_CSE_ID")]
    pub cse_id: String,

    /// Directory for result tables, downloads, and the analysis file
    #[arg(short, long, default_value = "./cbdc_data")]
    pub output_dir: String,

    /// Maximum number of results to fetch per query
    #[arg(long, default_value_t = 30)]
    pub max_results: u32,

    /// Timeout for search and download requests, in seconds
    #[arg(long, default_value_t = 30)]
    pub http_timeout_secs: u64,
}
