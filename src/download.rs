//! Document downloader: derived file names, browser User-Agent fetches,
//! and writes into the per-category directory.
//!
//! # File naming
//!
//! Names are derived from the URL, not from response headers:
//!
//! 1. the last URL path segment is the base name;
//! 2. every character outside `[A-Za-z0-9_.-]` becomes `_`;
//! 3. names shorter than 10 characters, or with more than 3 underscores,
//!    get a `hash(query) % 10000` prefix so generic names (`file.pdf`,
//!    `download`) stay distinguishable; two generic names under the same
//!    query still collide and overwrite, which is accepted;
//! 4. a name without an extension gets `.pdf` when the URL mentions `pdf`,
//!    `.html` otherwise.
//!
//! Derivation is deterministic: the same `(url, query)` pair always yields
//! the same name.

use std::path::{Path, PathBuf};
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};
use url::Url;

use crate::error::DownloadError;

/// Desktop-browser User-Agent sent on every download request. Sites that
/// block unidentified clients are otherwise inaccessible.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Characters that are replaced with `_` in derived file names.
static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.\-]").expect("static filename pattern"));

/// Names this short are considered too generic to stand on their own.
const MIN_DISTINCT_NAME_LEN: usize = 10;

/// More underscores than this marks a name as mangled-generic.
const MAX_UNDERSCORES: usize = 3;

/// HTTP client for fetching documents.
///
/// Create once and reuse; connection pooling and the fixed User-Agent are
/// configured on the inner client.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: reqwest::Client,
}

impl Downloader {
    /// Create a downloader whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(BROWSER_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch `link` and write the body under `category_dir`, returning the
    /// path written. An existing file with the same derived name is
    /// overwritten.
    ///
    /// # Errors
    ///
    /// [`DownloadError::InvalidUrl`] before any fetch for an unparseable
    /// link; [`DownloadError::Request`] / [`DownloadError::Status`] /
    /// [`DownloadError::Io`] for transport, HTTP, and write failures. The
    /// caller records these in the row and never propagates them further.
    #[instrument(level = "debug", skip_all, fields(link = %link))]
    pub async fn download(
        &self,
        link: &str,
        category_dir: &Path,
        query: &str,
    ) -> Result<PathBuf, DownloadError> {
        let url = Url::parse(link).map_err(|source| DownloadError::InvalidUrl {
            url: link.to_string(),
            source,
        })?;
        let file_name = derive_file_name(&url, query);
        let path = category_dir.join(&file_name);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status));
        }
        let bytes = response.bytes().await?;
        tokio::fs::write(&path, &bytes).await?;

        debug!(path = %path.display(), bytes = bytes.len(), "Downloaded file");
        Ok(path)
    }
}

/// Derive the on-disk file name for a download. Pure and deterministic.
pub fn derive_file_name(url: &Url, query: &str) -> String {
    let base = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");
    let mut name = UNSAFE_CHARS.replace_all(base, "_").into_owned();

    if name.len() < MIN_DISTINCT_NAME_LEN || name.matches('_').count() > MAX_UNDERSCORES {
        name = format!("{}_{name}", query_hash(query));
    }

    if Path::new(&name).extension().is_none() {
        if url.as_str().to_ascii_lowercase().contains("pdf") {
            name.push_str(".pdf");
        } else {
            name.push_str(".html");
        }
    }
    name
}

/// Deterministic FNV-1a hash of the query, folded to four digits.
///
/// 10000 buckets is collision-prone by design; the prefix only has to keep
/// generic names apart in practice, it guarantees nothing across distinct
/// queries.
fn query_hash(query: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
    let mut hash = FNV_OFFSET;
    for byte in query.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash % 10_000
}
