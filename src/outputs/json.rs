//! JSON output for the end-of-run analysis.

use std::error::Error;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::{info, instrument};

use crate::models::AnalysisSummary;

/// Fixed file name under the output directory.
pub const ANALYSIS_FILE_NAME: &str = "analysis.json";

/// Write the analysis summary to `<output_dir>/analysis.json`.
///
/// Pretty-printed with four-space indentation, the format downstream
/// consumers of the historical file expect.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn write_analysis(
    summary: &AnalysisSummary,
    output_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    summary.serialize(&mut serializer)?;

    let path = output_dir.join(ANALYSIS_FILE_NAME);
    fs::write(&path, buf).await?;
    info!(path = %path.display(), "Wrote analysis file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_analysis_json_schema() {
        let summary = AnalysisSummary {
            total_results: 2,
            results_by_category: BTreeMap::from([("white_papers".to_string(), 2)]),
            results_by_source: BTreeMap::from([("example.org".to_string(), 2)]),
            download_status: BTreeMap::from([
                ("success".to_string(), 1),
                ("failed".to_string(), 1),
            ]),
            file_types: BTreeMap::from([("pdf".to_string(), 2)]),
        };

        let dir = TempDir::new().unwrap();
        let path = write_analysis(&summary, dir.path()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "analysis.json");

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["total_results"], 2);
        assert_eq!(parsed["results_by_category"]["white_papers"], 2);
        assert_eq!(parsed["results_by_source"]["example.org"], 2);
        assert_eq!(parsed["download_status"]["success"], 1);
        assert_eq!(parsed["file_types"]["pdf"], 2);
    }
}
