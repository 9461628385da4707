//! Post-run aggregation over the result table.
//!
//! Read-only with respect to the table; produces the
//! [`AnalysisSummary`] that is serialized to `analysis.json` and echoed in
//! the stdout summary.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use itertools::Itertools;

use crate::models::{AnalysisSummary, ResultTable};

/// How many sources the by-source breakdown keeps.
const TOP_SOURCES: usize = 10;

/// Aggregate the table into counts by category, source, status, and type.
///
/// Every map except `results_by_source` partitions the table exactly, so
/// its values sum to `total_results`. Sources keep only the
/// [`TOP_SOURCES`] most frequent, ties broken by name so the output is
/// deterministic.
pub fn analyze(table: &ResultTable) -> AnalysisSummary {
    let rows = table.rows();

    let results_by_category = count_by(rows.iter().map(|r| r.category.clone()));
    let download_status = count_by(rows.iter().map(|r| r.download_status.to_string()));
    let file_types = count_by(rows.iter().map(|r| r.file_type.to_string()));

    let results_by_source = count_by(rows.iter().map(|r| r.source.clone()))
        .into_iter()
        .sorted_by_key(|(name, count)| (Reverse(*count), name.clone()))
        .take(TOP_SOURCES)
        .collect();

    AnalysisSummary {
        total_results: rows.len(),
        results_by_category,
        results_by_source,
        download_status,
        file_types,
    }
}

fn count_by(keys: impl Iterator<Item = String>) -> BTreeMap<String, usize> {
    keys.counts().into_iter().collect()
}
