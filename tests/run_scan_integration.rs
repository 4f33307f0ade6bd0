//! Integration tests for run_scan
//!
//! These tests run the real HTTP prober against a local mock server and store
//! the summary in a temporary SQLite database.

mod helpers;

use ca_census::initialization::init_crypto_provider;
use ca_census::{query_run_history, run_scan, Category, SqliteSummaryStore};
use helpers::{create_temp_dir, create_test_config, read_result_file, write_targets_file};
use sqlx::Row;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn start_mock_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_run_scan_against_mock_server() {
    init_crypto_provider();
    let server = start_mock_server().await;
    let ok = format!("{}/ok", server.uri());
    let missing = format!("{}/missing", server.uri());
    let slow = format!("{}/slow", server.uri());
    let input = write_targets_file(&[&ok, "", &missing, &slow]);

    let out = create_temp_dir();
    let db_path = out.path().join("statistics.db");
    let mut config = create_test_config(input.path(), out.path(), db_path.clone());
    config.timeout_seconds = 1;
    config.dataset_updated = true;

    let report = run_scan(config).await.expect("run_scan should succeed");

    assert_eq!(report.total_targets, 3);
    assert_eq!(read_result_file(out.path(), Category::Successful), vec![ok]);
    assert_eq!(
        read_result_file(out.path(), Category::Unsuccessful),
        vec![format!("{missing} – status code: 404")]
    );
    assert_eq!(
        read_result_file(out.path(), Category::RequestError),
        vec![format!("{slow} – Request timed out")]
    );

    let store = SqliteSummaryStore::open(&db_path).await.expect("open db");
    let runs = query_run_history(store.pool(), None)
        .await
        .expect("query history");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].run_id, report.run_id);
    assert_eq!(runs[0].timeout_secs, 1);
    assert_eq!(runs[0].total_targets, 3);
    assert_eq!(runs[0].untrusted_count, 0);
    assert_eq!(runs[0].self_signed_count, 0);
    assert!(runs[0].dataset_updated);
    store.close().await;
}

#[tokio::test]
async fn test_runs_accumulate_in_database() {
    init_crypto_provider();
    let server = start_mock_server().await;
    let ok = format!("{}/ok", server.uri());
    let input = write_targets_file(&[&ok]);

    let out = create_temp_dir();
    let db_path = out.path().join("statistics.db");
    let config = create_test_config(input.path(), out.path(), db_path.clone());

    let first = run_scan(config.clone()).await.expect("first run");
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = run_scan(config).await.expect("second run");
    assert_ne!(first.run_id, second.run_id);

    // Result files hold only the latest run
    assert_eq!(read_result_file(out.path(), Category::Successful).len(), 1);

    let store = SqliteSummaryStore::open(&db_path).await.expect("open db");
    let runs = query_run_history(store.pool(), None)
        .await
        .expect("query history");
    let ids: Vec<&str> = runs.iter().map(|r| r.run_id.as_str()).collect();
    assert_eq!(ids, vec![second.run_id.as_str(), first.run_id.as_str()]);

    let flagged: i64 = sqlx::query("SELECT COUNT(*) AS n FROM flagged_targets")
        .fetch_one(store.pool())
        .await
        .expect("count")
        .get("n");
    assert_eq!(flagged, 0);
    store.close().await;
}

#[tokio::test]
async fn test_unreachable_host_is_recorded_as_request_error() {
    init_crypto_provider();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);

    let target = format!("http://127.0.0.1:{port}/");
    let input = write_targets_file(&[&target]);
    let out = create_temp_dir();
    let config = create_test_config(input.path(), out.path(), out.path().join("s.db"));

    run_scan(config).await.expect("run_scan should succeed");

    let errors = read_result_file(out.path(), Category::RequestError);
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0].starts_with(&format!("{target} – error: ")),
        "unexpected line {}",
        errors[0]
    );
}
