//! Output generation modules for the tabular results and the analysis file.
//!
//! # Submodules
//!
//! - [`csv`]: Rewrites `cbdc_results.csv` from the in-memory table
//! - [`xlsx`]: Rewrites `cbdc_results.xlsx` with the same rows
//! - [`json`]: Writes the end-of-run `analysis.json`
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── cbdc_results.csv
//! ├── cbdc_results.xlsx
//! ├── analysis.json
//! └── <category>/            one per catalog category
//!     └── <downloaded files>
//! ```
//!
//! [`flush`] runs after every batch and fully overwrites both tabular
//! files, so a mid-run crash loses at most one unflushed batch. The
//! redundant full rewrites are a simplicity-over-efficiency tradeoff that
//! suits run sizes in the low thousands of rows.

use std::error::Error;
use std::path::Path;

use tracing::{info, instrument};

use crate::models::ResultTable;

pub mod csv;
pub mod json;
pub mod xlsx;

/// Column header shared by the CSV and XLSX outputs, in order.
pub const COLUMNS: [&str; 9] = [
    "title",
    "link",
    "snippet",
    "source",
    "category",
    "query",
    "file_path",
    "file_type",
    "download_status",
];

/// Rewrite both tabular files from the full table.
///
/// Idempotent overwrite: N rows in the table produce exactly N data rows on
/// disk no matter how many times this has run before.
#[instrument(level = "debug", skip_all, fields(rows = table.len()))]
pub fn flush(table: &ResultTable, output_dir: &Path) -> Result<(), Box<dyn Error>> {
    let csv_path = csv::write_table(table, output_dir)?;
    let xlsx_path = xlsx::write_table(table, output_dir)?;
    info!(
        csv = %csv_path.display(),
        xlsx = %xlsx_path.display(),
        rows = table.len(),
        "Results saved"
    );
    Ok(())
}
