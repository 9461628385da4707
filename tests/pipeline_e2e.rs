//! End-to-end pipeline scenarios against a mock search endpoint and a mock
//! document server.
//!
//! Covers: classification and download outcomes per row, the record
//! invariant, row ordering, per-batch persistence, continue-on-quota-error,
//! and the paginated request plan as seen over the wire.

use std::path::Path;
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cbdc_harvester::analyze::analyze;
use cbdc_harvester::catalog::QueryCatalog;
use cbdc_harvester::download::Downloader;
use cbdc_harvester::models::{DownloadStatus, ResultTable};
use cbdc_harvester::run::{RunConfig, run_catalog};
use cbdc_harvester::search::SearchClient;
use cbdc_harvester::utils::prepare_output_dirs;

const PDF_QUERY: &str = r#""CBDC" OR "digital euro" filetype:pdf"#;
const QUOTA_QUERY: &str = r#"site:europa.eu "CBDC legal framework""#;
const HTML_QUERY: &str = r#"site:ecb.europa.eu "digital euro""#;

fn test_config(output_dir: &Path, max_results: u32) -> RunConfig {
    RunConfig {
        output_dir: output_dir.to_path_buf(),
        max_results_per_query: max_results,
        page_pause_secs: (0.0, 0.0),
    }
}

async fn test_clients(server: &MockServer) -> (SearchClient, Downloader) {
    let search = SearchClient::new("test-key", "test-cx", Duration::from_secs(5))
        .expect("search client")
        .with_endpoint(format!("{}/customsearch/v1", server.uri()));
    let downloader = Downloader::new(Duration::from_secs(5)).expect("downloader");
    (search, downloader)
}

fn search_page(items: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "items": items }))
}

fn assert_record_invariant(table: &ResultTable) {
    for record in table.rows() {
        assert_eq!(
            record.file_path.is_some(),
            record.download_status == DownloadStatus::Success,
            "file_path must be set iff download succeeded: {record:?}"
        );
    }
}

/// The three spec scenarios in one run: a 404'd PDF records `failed`, a
/// good PDF records `success` with a real file on disk, an HTML result is
/// never fetched, and a quota-rejected query is skipped without aborting
/// the run or disturbing earlier rows.
#[tokio::test]
async fn test_full_run_outcomes_and_recovery() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("q", PDF_QUERY))
        .respond_with(search_page(json!([
            {
                "title": "EU 2023 report",
                "link": format!("{base}/reports/eu2023.pdf"),
                "snippet": "Digital euro report"
            },
            {
                "title": "Gone report",
                "link": format!("{base}/reports/missing.pdf"),
                "snippet": "404s"
            },
            {
                "title": "Broken link",
                "link": "not-a-valid-link.pdf",
                "snippet": "malformed"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("q", QUOTA_QUERY))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "Quota exceeded" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("q", HTML_QUERY))
        .respond_with(search_page(json!([
            {
                "title": "ECB page",
                "link": "https://ecb.europa.eu/page.html",
                "snippet": "A page"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/reports/eu2023.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 fake".as_slice()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reports/missing.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let catalog = QueryCatalog::new(vec![
        ("white_papers", vec![PDF_QUERY]),
        ("official_websites", vec![QUOTA_QUERY, HTML_QUERY]),
    ]);
    let output = TempDir::new().unwrap();
    let config = test_config(output.path(), 10);
    prepare_output_dirs(&config.output_dir, &catalog).await.unwrap();
    let (search, downloader) = test_clients(&server).await;

    let table = run_catalog(&config, &catalog, &search, &downloader).await;

    // Quota query contributed nothing; everything else is present, in
    // catalog order.
    assert_eq!(table.len(), 4);
    assert_record_invariant(&table);
    let rows = table.rows();

    assert_eq!(rows[0].title, "EU 2023 report");
    assert_eq!(rows[0].download_status, DownloadStatus::Success);
    assert_eq!(rows[0].file_type.as_str(), "pdf");
    assert_eq!(rows[0].category, "white_papers");
    let downloaded = rows[0].file_path.as_ref().unwrap();
    assert!(downloaded.ends_with("eu2023.pdf"), "got {downloaded}");
    assert_eq!(std::fs::read(downloaded).unwrap(), b"%PDF-1.4 fake".to_vec());

    assert_eq!(rows[1].download_status, DownloadStatus::Failed);
    assert_eq!(rows[1].file_path, None);

    match &rows[2].download_status {
        DownloadStatus::Error(message) => assert!(message.contains("invalid download URL")),
        other => panic!("expected error status, got {other:?}"),
    }
    // An unparseable link also yields an empty source.
    assert_eq!(rows[2].source, "");

    assert_eq!(rows[3].title, "ECB page");
    assert_eq!(rows[3].category, "official_websites");
    assert_eq!(rows[3].file_type.as_str(), "html");
    assert_eq!(rows[3].download_status, DownloadStatus::NotAttempted);
    assert_eq!(rows[3].source, "ecb.europa.eu");

    // Both tabular files exist and the CSV holds exactly one data row per
    // record despite multiple intermediate flushes.
    let csv = std::fs::read_to_string(output.path().join("cbdc_results.csv")).unwrap();
    assert_eq!(csv.lines().count(), 1 + table.len());
    assert!(output.path().join("cbdc_results.xlsx").exists());

    // Aggregate counts partition the table.
    let summary = analyze(&table);
    assert_eq!(summary.total_results, 4);
    assert_eq!(summary.results_by_category.values().sum::<usize>(), 4);
    assert_eq!(summary.download_status.values().sum::<usize>(), 4);
    assert_eq!(summary.file_types.values().sum::<usize>(), 4);
    assert_eq!(summary.results_by_category["white_papers"], 3);
    assert_eq!(summary.results_by_category["official_websites"], 1);
}

/// Ceilings above ten are split into 1-based pages of at most ten, with the
/// final page shrunk to hit the ceiling exactly, verified over the wire by
/// per-page mock expectations.
#[tokio::test]
async fn test_pagination_request_plan_over_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("q", "paged"))
        .and(query_param("start", "1"))
        .and(query_param("num", "10"))
        .respond_with(search_page(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("q", "paged"))
        .and(query_param("start", "11"))
        .and(query_param("num", "5"))
        .respond_with(search_page(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = QueryCatalog::new(vec![("c", vec!["paged"])]);
    let output = TempDir::new().unwrap();
    let config = test_config(output.path(), 15);
    prepare_output_dirs(&config.output_dir, &catalog).await.unwrap();
    let (search, downloader) = test_clients(&server).await;

    let table = run_catalog(&config, &catalog, &search, &downloader).await;
    assert!(table.is_empty());

    // Mock expectations (exactly one request per page) are verified on drop.
    server.verify().await;
}

/// A ceiling at the page cap issues exactly one request.
#[tokio::test]
async fn test_small_ceiling_issues_single_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("start", "1"))
        .and(query_param("num", "10"))
        .respond_with(search_page(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = QueryCatalog::new(vec![("c", vec!["single"])]);
    let output = TempDir::new().unwrap();
    let config = test_config(output.path(), 10);
    prepare_output_dirs(&config.output_dir, &catalog).await.unwrap();
    let (search, downloader) = test_clients(&server).await;

    run_catalog(&config, &catalog, &search, &downloader).await;
    server.verify().await;
}
