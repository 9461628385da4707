//! Utility functions for filesystem preparation and log formatting.

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;

use tokio::fs;
use tracing::{info, instrument};

use crate::catalog::QueryCatalog;

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes with an ellipsis and byte
/// count indicator appended. Used to keep API error bodies readable in the
/// log.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…(+{} bytes)", &s[..end], s.len() - end)
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then performs a write test by creating
/// and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = path.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

/// Create the output tree: the writable root plus one subdirectory per
/// catalog category. Called once at startup, before any query runs; a
/// failure here is the only fatal error in the pipeline.
pub async fn prepare_output_dirs(
    output_dir: &Path,
    catalog: &QueryCatalog,
) -> Result<(), Box<dyn Error>> {
    ensure_writable_dir(output_dir).await?;
    for name in catalog.category_names() {
        fs::create_dir_all(output_dir.join(name)).await?;
    }
    info!(
        categories = catalog.category_names().count(),
        "Category directories ready"
    );
    Ok(())
}
