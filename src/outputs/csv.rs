//! CSV output: the full table, one file, overwritten per batch.

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::models::ResultTable;

/// Fixed file name under the output directory.
pub const CSV_FILE_NAME: &str = "cbdc_results.csv";

/// Serialize every row to `<output_dir>/cbdc_results.csv`, replacing any
/// previous contents. The header is written explicitly so an empty table
/// still produces a valid file with the column row.
pub fn write_table(table: &ResultTable, output_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let path = output_dir.join(CSV_FILE_NAME);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)?;
    writer.write_record(super::COLUMNS)?;
    for record in table.rows() {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(path)
}
