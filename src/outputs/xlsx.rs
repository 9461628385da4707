//! XLSX output: the same rows as the CSV, for spreadsheet viewing.

use std::error::Error;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;

use crate::models::ResultTable;

/// Fixed file name under the output directory.
pub const XLSX_FILE_NAME: &str = "cbdc_results.xlsx";

/// Write the full table to `<output_dir>/cbdc_results.xlsx`, replacing any
/// previous file. Row 0 is the shared column header; every cell is written
/// as a string.
pub fn write_table(table: &ResultTable, output_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let path = output_dir.join(XLSX_FILE_NAME);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in super::COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }
    for (i, record) in table.rows().iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &record.title)?;
        worksheet.write_string(row, 1, &record.link)?;
        worksheet.write_string(row, 2, &record.snippet)?;
        worksheet.write_string(row, 3, &record.source)?;
        worksheet.write_string(row, 4, &record.category)?;
        worksheet.write_string(row, 5, &record.query)?;
        worksheet.write_string(row, 6, record.file_path.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 7, record.file_type.as_str())?;
        worksheet.write_string(row, 8, record.download_status.to_string())?;
    }

    workbook.save(&path)?;
    Ok(path)
}
