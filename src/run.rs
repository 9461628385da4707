//! Run orchestrator: categories → queries → pages, strictly sequential.
//!
//! For every page the orchestrator calls the search client, classifies each
//! result, downloads document-typed links, appends the rows, flushes the
//! tabular outputs, and pauses for a uniformly random interval before the
//! next page. Pagination, pacing, and the error containment rules live
//! here; everything it calls is a leaf.
//!
//! # Error containment
//!
//! A failure anywhere in a query's page processing (search call, flush)
//! is logged and the run moves on to the next query; one bad query never
//! aborts the run. Download failures are narrower still: they are recorded
//! in the row's `download_status` and don't even end the page.

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use rand::{Rng, rng};
use tracing::{debug, error, info, instrument};

use crate::catalog::QueryCatalog;
use crate::classify;
use crate::download::Downloader;
use crate::error::DownloadError;
use crate::models::{DownloadStatus, ResultRecord, ResultTable, SearchResult};
use crate::outputs;
use crate::search::SearchClient;

/// The API's hard page-size cap.
pub const PAGE_SIZE: u32 = 10;

/// Immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root directory for result tables and per-category downloads.
    pub output_dir: PathBuf,
    /// Per-query ceiling on fetched results.
    pub max_results_per_query: u32,
    /// Bounds of the uniformly random pause between pages, in seconds.
    /// `(0.0, 0.0)` disables the pause (tests).
    pub page_pause_secs: (f64, f64),
}

impl RunConfig {
    /// The production pause bounds: 1 to 3 seconds, rate-limit courtesy.
    pub const DEFAULT_PAGE_PAUSE: (f64, f64) = (1.0, 3.0);
}

/// The 1-based `(start_index, num)` request plan for a per-query ceiling.
///
/// Page size is capped at [`PAGE_SIZE`]; the final page shrinks to exactly
/// reach the ceiling. A ceiling of zero yields no requests.
pub fn page_plan(max_results: u32) -> Vec<(u32, u8)> {
    let mut plan = Vec::new();
    let mut start = 1;
    while start <= max_results {
        let num = PAGE_SIZE.min(max_results - start + 1) as u8;
        plan.push((start, num));
        start += PAGE_SIZE;
    }
    plan
}

/// Run every query of the catalog once, returning the accumulated table.
///
/// The table on disk is flushed after every page, so the in-memory value
/// returned here is at most one batch ahead of the durable copy.
#[instrument(level = "info", skip_all, fields(categories = catalog.category_names().count()))]
pub async fn run_catalog(
    config: &RunConfig,
    catalog: &QueryCatalog,
    search: &SearchClient,
    downloader: &Downloader,
) -> ResultTable {
    let mut table = ResultTable::new();
    let total_queries = catalog.total_queries();
    let mut query_count = 0;

    for (category, queries) in catalog.categories() {
        for query in queries {
            query_count += 1;
            info!(query_count, total_queries, category, query = %query, "Processing query");
            if let Err(e) = run_query(config, category, query, search, downloader, &mut table).await
            {
                error!(category, query = %query, error = %e, "Query failed; continuing with next query");
            }
        }
    }
    table
}

/// Fetch and process every page of one query.
///
/// Returns the first error from the search call or the flush; rows appended
/// before the failure stay in the table.
async fn run_query(
    config: &RunConfig,
    category: &str,
    query: &str,
    search: &SearchClient,
    downloader: &Downloader,
    table: &mut ResultTable,
) -> Result<(), Box<dyn Error>> {
    for (start_index, num) in page_plan(config.max_results_per_query) {
        let results = search.search(query, start_index, num).await?;
        let fetched = results.len();

        for result in results {
            let record = process_result(config, category, query, downloader, result).await;
            table.push(record);
        }
        outputs::flush(table, &config.output_dir)?;
        debug!(start_index, fetched, "Page complete");

        pause_between_pages(config).await;
    }
    Ok(())
}

/// Turn one search result into a persisted record.
///
/// Documents (pdf/doc) get a download attempt whose outcome lands in
/// `download_status`; everything else is recorded as `not_attempted`.
/// The record invariant holds by construction: `file_path` is populated
/// only on the success arm.
async fn process_result(
    config: &RunConfig,
    category: &str,
    query: &str,
    downloader: &Downloader,
    result: SearchResult,
) -> ResultRecord {
    let source = classify::extract_domain(&result.link);
    let file_type = classify::classify(query, &result.link);

    let (file_path, download_status) = if file_type.is_document() {
        let category_dir = config.output_dir.join(category);
        match downloader.download(&result.link, &category_dir, query).await {
            Ok(path) => (
                Some(path.display().to_string()),
                DownloadStatus::Success,
            ),
            Err(e @ DownloadError::InvalidUrl { .. }) => {
                debug!(link = %result.link, error = %e, "Skipping malformed link");
                (None, DownloadStatus::Error(e.to_string()))
            }
            Err(e) => {
                debug!(link = %result.link, error = %e, "Download failed");
                (None, DownloadStatus::Failed)
            }
        }
    } else {
        (None, DownloadStatus::NotAttempted)
    };

    ResultRecord {
        title: result.title,
        link: result.link,
        snippet: result.snippet,
        source,
        category: category.to_string(),
        query: query.to_string(),
        file_path,
        file_type,
        download_status,
    }
}

/// Sleep for a uniformly random duration inside the configured bounds.
///
/// Courtesy pacing only. No exponential backoff, no reading of API retry
/// hints.
async fn pause_between_pages(config: &RunConfig) {
    let (low, high) = config.page_pause_secs;
    if high <= 0.0 {
        return;
    }
    let secs = rng().random_range(low..=high);
    debug!(secs, "Pausing before next page");
    tokio::time::sleep(Duration::from_secs_f64(secs)).await;
}
