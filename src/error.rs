//! Error types for the two network boundaries.
//!
//! The propagation policy is deliberately shallow: a [`DownloadError`] is
//! caught per result and recorded as a download-status value in the row, and
//! a [`SearchApiError`] is caught per query, logged, and the run continues
//! with the next query. Neither aborts the run; nothing here is retried.

use thiserror::Error;

/// Error type for Custom Search API calls.
#[derive(Debug, Error)]
pub enum SearchApiError {
    /// Transport-level failure: DNS, TLS, connect or read timeout.
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status. Covers authentication
    /// failure, quota exhaustion, and malformed queries; the status line and
    /// a truncated response body are kept for the log.
    #[error("search API returned {status}: {message}")]
    Api {
        /// The HTTP status the API responded with.
        status: reqwest::StatusCode,
        /// Response body, truncated for logging.
        message: String,
    },
}

/// Error type for document download attempts.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The result link is not a parseable URL, so no fetch was attempted.
    #[error("invalid download URL {url}: {source}")]
    InvalidUrl {
        /// The offending link.
        url: String,
        /// The underlying parse failure.
        source: url::ParseError,
    },

    /// Transport-level failure while fetching the document.
    #[error("download request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),

    /// Writing the fetched bytes to disk failed.
    #[error("failed writing downloaded file: {0}")]
    Io(#[from] std::io::Error),
}
