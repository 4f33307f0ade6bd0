//! End-to-end runs with a synthetic prober.
//!
//! These tests drive `run_with` through the real sink and summary stages
//! without touching the network.

mod helpers;

use ca_census::{run_with, Category, IssuerName, Outcome};
use helpers::{
    create_temp_dir, create_test_config, read_result_file, total_result_lines,
    write_targets_file, RecordingStore, TableProber,
};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_mixed_outcomes_scenario() {
    let input = write_targets_file(&["good.example", "", "  slow.example  ", "badcert.example"]);
    let out = create_temp_dir();
    let config = create_test_config(input.path(), out.path(), PathBuf::from("unused.db"));
    let prober = Arc::new(TableProber::new(&[
        ("https://good.example", Outcome::Success { status: 200 }),
        ("https://slow.example", Outcome::Timeout),
        (
            "https://badcert.example",
            Outcome::TlsFailure {
                error: "invalid peer certificate: UnknownIssuer".to_string(),
                issuer: Some(IssuerName::from("SberCA")),
            },
        ),
    ]));
    let store = RecordingStore::new();

    let report = run_with(&config, prober, store.as_ref())
        .await
        .expect("run should succeed");

    assert_eq!(
        read_result_file(out.path(), Category::Successful),
        vec!["https://good.example"]
    );
    assert_eq!(
        read_result_file(out.path(), Category::RequestError),
        vec!["https://slow.example – Request timed out"]
    );
    assert_eq!(
        read_result_file(out.path(), Category::SslSelfSigned),
        vec!["https://badcert.example – CA: SberCA"]
    );
    assert!(read_result_file(out.path(), Category::Unsuccessful).is_empty());
    assert!(read_result_file(out.path(), Category::SslUntrustedCa).is_empty());
    assert!(read_result_file(out.path(), Category::SslOther).is_empty());

    let summary = store.single();
    assert_eq!(summary.total_targets, 3);
    assert_eq!(summary.untrusted_count, 0);
    assert_eq!(summary.self_signed_count, 1);
    assert_eq!(summary.timeout_secs, 5);
    assert!(!summary.dataset_updated);
    assert!(summary.run_id.starts_with("run_"));

    assert_eq!(report.total_targets, 3);
    assert_eq!(report.count(Category::SslSelfSigned), 1);
    assert_eq!(report.store_name, "memory");
}

#[tokio::test]
async fn test_every_category_and_issuer_watchlist() {
    let input = write_targets_file(&[
        "ok.example",
        "broken.example",
        "gov.example",
        "bank.example",
        "foreign.example",
        "unreadable.example",
        "dns.example",
        "crash.example",
    ]);
    let out = create_temp_dir();
    let mut config = create_test_config(input.path(), out.path(), PathBuf::from("unused.db"));
    config.dataset_updated = true;
    let prober = Arc::new(TableProber::new(&[
        ("https://ok.example", Outcome::Success { status: 200 }),
        ("https://broken.example", Outcome::HttpError { status: 503 }),
        (
            "https://gov.example",
            Outcome::TlsFailure {
                error: "invalid peer certificate: UnknownIssuer".to_string(),
                issuer: Some(IssuerName::from("Russian Trusted Sub CA")),
            },
        ),
        (
            "https://bank.example",
            Outcome::TlsFailure {
                error: "invalid peer certificate: UnknownIssuer".to_string(),
                issuer: Some(IssuerName::from("VTB Group")),
            },
        ),
        (
            "https://foreign.example",
            Outcome::TlsFailure {
                error: "invalid peer certificate: Expired".to_string(),
                issuer: Some(IssuerName::from("Let's Encrypt")),
            },
        ),
        (
            "https://unreadable.example",
            Outcome::TlsFailure {
                error: "invalid peer certificate: UnknownIssuer".to_string(),
                issuer: None,
            },
        ),
        (
            "https://crash.example",
            Outcome::FatalError {
                error: "builder error".to_string(),
            },
        ),
    ]));
    let store = RecordingStore::new();

    let report = run_with(&config, prober, store.as_ref())
        .await
        .expect("run should succeed");

    assert_eq!(
        read_result_file(out.path(), Category::Unsuccessful),
        vec!["https://broken.example – status code: 503"]
    );
    assert_eq!(
        read_result_file(out.path(), Category::SslUntrustedCa),
        vec!["https://gov.example – CA: Russian Trusted Sub CA"]
    );
    assert_eq!(
        read_result_file(out.path(), Category::SslSelfSigned),
        vec!["https://bank.example – CA: VTB Group"]
    );
    let mut other = read_result_file(out.path(), Category::SslOther);
    other.sort();
    assert_eq!(
        other,
        vec![
            "https://foreign.example – CA: Let's Encrypt",
            "https://unreadable.example – CA: unknown"
        ]
    );
    let mut errors = read_result_file(out.path(), Category::RequestError);
    errors.sort();
    assert_eq!(
        errors,
        vec![
            "https://crash.example – error: builder error",
            "https://dns.example – error: no route to host"
        ]
    );

    assert_eq!(total_result_lines(out.path()), 8);
    assert_eq!(report.fatal_count, 1);
    assert_eq!(report.unrecorded_count, 0);

    let summary = store.single();
    assert_eq!(summary.total_targets, 8);
    assert_eq!(summary.untrusted_count, 1);
    assert_eq!(summary.self_signed_count, 1);
    assert!(summary.dataset_updated);
    assert_eq!(
        summary.untrusted_targets,
        vec!["https://gov.example – CA: Russian Trusted Sub CA"]
    );
}

#[tokio::test]
async fn test_non_positive_timeout_falls_back_to_default() {
    let input = write_targets_file(&["ok.example"]);
    let out = create_temp_dir();
    let mut config = create_test_config(input.path(), out.path(), PathBuf::from("unused.db"));
    config.timeout_seconds = -3;
    let prober = Arc::new(TableProber::new(&[(
        "https://ok.example",
        Outcome::Success { status: 200 },
    )]));
    let store = RecordingStore::new();

    run_with(&config, prober, store.as_ref())
        .await
        .expect("run should succeed");

    assert_eq!(store.single().timeout_secs, 15);
}

#[tokio::test]
async fn test_empty_input_produces_empty_summary() {
    let input = write_targets_file(&["", "   ", "\t"]);
    let out = create_temp_dir();
    let config = create_test_config(input.path(), out.path(), PathBuf::from("unused.db"));
    let store = RecordingStore::new();

    let report = run_with(&config, Arc::new(TableProber::new(&[])), store.as_ref())
        .await
        .expect("run should succeed");

    assert_eq!(report.total_targets, 0);
    assert_eq!(total_result_lines(out.path()), 0);
    let summary = store.single();
    assert_eq!(summary.total_targets, 0);
    assert_eq!(summary.untrusted_count, 0);
    assert_eq!(summary.self_signed_count, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_line_count_matches_input_under_load() {
    let hosts: Vec<String> = (0..2_000).map(|i| format!("host-{i}.example")).collect();
    let mut lines: Vec<&str> = hosts.iter().map(String::as_str).collect();
    lines.insert(100, "");
    lines.insert(500, "   ");
    let input = write_targets_file(&lines);
    let out = create_temp_dir();
    let mut config = create_test_config(input.path(), out.path(), PathBuf::from("unused.db"));
    config.max_concurrency = Some(64);
    let store = RecordingStore::new();

    run_with(&config, Arc::new(TableProber::new(&[])), store.as_ref())
        .await
        .expect("run should succeed");

    assert_eq!(total_result_lines(out.path()), 2_000);
    assert_eq!(store.single().total_targets, 2_000);
}

#[tokio::test]
async fn test_missing_input_file_is_an_error() {
    let out = create_temp_dir();
    let config = create_test_config(
        &out.path().join("missing.txt"),
        out.path(),
        PathBuf::from("unused.db"),
    );
    let store = RecordingStore::new();

    let result = run_with(&config, Arc::new(TableProber::new(&[])), store.as_ref()).await;
    assert!(result.is_err());
    assert!(store.summaries.lock().expect("lock").is_empty());
}
