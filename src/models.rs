//! Data models for search results, persisted records, and run summaries.
//!
//! This module defines the core data structures used throughout the application:
//! - [`SearchResult`]: A raw hit from the Custom Search API, consumed within one batch
//! - [`ResultRecord`]: One persisted row describing a result and its download outcome
//! - [`ResultTable`]: The append-only, insertion-ordered collection of records for a run
//! - [`FileType`] / [`DownloadStatus`]: The enumerated classification and outcome labels
//! - [`AnalysisSummary`]: The end-of-run aggregate counts written to `analysis.json`
//!
//! # Record invariant
//!
//! For every [`ResultRecord`], `file_path` is `Some` if and only if
//! `download_status` is [`DownloadStatus::Success`]. The orchestrator is the
//! only producer of records and upholds this when converting download
//! outcomes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// A single search hit as returned by the Custom Search API.
///
/// The API omits fields it has no value for, so each field defaults to the
/// empty string. Results are ephemeral: they are turned into
/// [`ResultRecord`]s within the batch that produced them.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    /// The result title.
    #[serde(default)]
    pub title: String,
    /// The result URL.
    #[serde(default)]
    pub link: String,
    /// The short text snippet shown with the result.
    #[serde(default)]
    pub snippet: String,
}

/// Content-type label assigned by the classification heuristic.
///
/// This is derived from the query text and the link suffix, never from the
/// fetched content, so it may misclassify; that is accepted behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// PDF document; download is attempted.
    Pdf,
    /// Word document (`.doc` / `.docx`); download is attempted.
    Doc,
    /// Everything else; recorded but never downloaded.
    Html,
}

impl FileType {
    /// The lowercase token used in the tabular and JSON outputs.
    pub fn as_str(self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Doc => "doc",
            FileType::Html => "html",
        }
    }

    /// Whether this type triggers a download attempt.
    pub fn is_document(self) -> bool {
        matches!(self, FileType::Pdf | FileType::Doc)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FileType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Outcome of the per-result download attempt.
///
/// Three short enumerated tokens plus a free-text variant for failures that
/// happen before the fetch itself (an unparseable URL, for instance). The
/// free-text variant renders as `error: <message>`, matching the historical
/// output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    /// The result was not a downloadable document type.
    NotAttempted,
    /// The file was fetched and written; `file_path` holds its location.
    Success,
    /// The fetch or write failed (network, HTTP status, filesystem).
    Failed,
    /// A pre-download failure, carrying the error message.
    Error(String),
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadStatus::NotAttempted => f.write_str("not_attempted"),
            DownloadStatus::Success => f.write_str("success"),
            DownloadStatus::Failed => f.write_str("failed"),
            DownloadStatus::Error(message) => write!(f, "error: {message}"),
        }
    }
}

impl Serialize for DownloadStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One persisted row: a search result plus its classification and download
/// outcome.
///
/// Field order here is the column order of the CSV and XLSX outputs; the
/// `csv` crate derives the header row from these field names.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRecord {
    /// Result title from the search API.
    pub title: String,
    /// Result URL from the search API.
    pub link: String,
    /// Result snippet from the search API.
    pub snippet: String,
    /// Host component of the link; empty when the link does not parse.
    pub source: String,
    /// Catalog category the query belongs to.
    pub category: String,
    /// The query string that produced this result.
    pub query: String,
    /// Path of the downloaded file; set iff the download succeeded.
    pub file_path: Option<String>,
    /// Classification label for the link.
    pub file_type: FileType,
    /// Download outcome for the link.
    pub download_status: DownloadStatus,
}

/// Append-only, insertion-ordered table of records for one run.
///
/// Insertion order is processing order: category order, then query order
/// within the category, then page order, then in-page result order.
/// Duplicate links across queries are retained as separate rows; the table
/// never deduplicates or updates rows.
#[derive(Debug, Default)]
pub struct ResultTable {
    rows: Vec<ResultRecord>,
}

impl ResultTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. O(1) amortized; no validation beyond the type shape.
    pub fn push(&mut self, record: ResultRecord) {
        self.rows.push(record);
    }

    /// Number of rows accumulated so far.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The rows in insertion order.
    pub fn rows(&self) -> &[ResultRecord] {
        &self.rows
    }
}

/// End-of-run aggregate counts, serialized to `analysis.json`.
///
/// `results_by_source` keeps only the ten most frequent sources; all other
/// maps partition the table exactly, so their values sum to `total_results`.
#[derive(Debug, Serialize)]
pub struct AnalysisSummary {
    /// Total number of rows in the table.
    pub total_results: usize,
    /// Row count per catalog category.
    pub results_by_category: BTreeMap<String, usize>,
    /// Row count per source host, top ten by count.
    pub results_by_source: BTreeMap<String, usize>,
    /// Row count per download-status label.
    pub download_status: BTreeMap<String, usize>,
    /// Row count per file-type label.
    pub file_types: BTreeMap<String, usize>,
}
