//! Integration tests for greenorb-store
//!
//! These tests drive the full persist/archive cycle against a mock store API.

use greenorb_domain::{Ledger, NormalizedRecord, PersistOutcome};
use greenorb_store::{AuditLog, ProcessedArchive, RemoteStore, StoreLedger};
use serde_json::json;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ledger_for(server: &MockServer, root: &Path) -> StoreLedger {
    let remote = RemoteStore::new(format!("{}/api/scout", server.uri()), Duration::from_secs(5)).unwrap();
    StoreLedger::new(
        AuditLog::new(root.join("JSON_Results")),
        remote,
        ProcessedArchive::new(root.join("Processed")),
    )
}

fn acme(year: Option<i32>) -> NormalizedRecord {
    let mut record = NormalizedRecord::placeholder("Acme Corp");
    record.sector = "Energy".to_string();
    record.country = "Norway".to_string();
    record.report_year = year;
    record.methodology = "Extracted from ESG report acme.pdf".to_string();
    record
}

fn exts() -> Vec<String> {
    vec!["pdf".to_string()]
}

#[tokio::test]
async fn test_persist_posts_payload_and_writes_audit_copy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scout"))
        .and(body_partial_json(json!({
            "name": "Acme Corp",
            "sector": "Energy",
            "country": "Norway",
            "co2": null,
            "report_year": 2024,
            "s1": 0.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let ledger = ledger_for(&server, tmp.path());

    let outcome = ledger.persist(&acme(Some(2024))).await;

    assert_eq!(outcome, PersistOutcome::Saved);
    assert!(tmp.path().join("JSON_Results").join("Acme_Corp_2024.json").is_file());
    assert_eq!(ledger.confirmed_count(), 1);
}

#[tokio::test]
async fn test_same_record_twice_is_single_file_and_single_post() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let ledger = ledger_for(&server, tmp.path());

    assert_eq!(ledger.persist(&acme(Some(2024))).await, PersistOutcome::Saved);
    assert_eq!(ledger.persist(&acme(Some(2024))).await, PersistOutcome::DuplicateSkipped);

    let files = fs::read_dir(tmp.path().join("JSON_Results")).unwrap().count();
    assert_eq!(files, 1);
}

#[tokio::test]
async fn test_changed_record_is_pushed_again() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let ledger = ledger_for(&server, tmp.path());

    let mut record = acme(None);
    assert_eq!(ledger.persist(&record).await, PersistOutcome::Saved);
    record.products = "Wind turbines".to_string();
    assert_eq!(ledger.persist(&record).await, PersistOutcome::Saved);

    // Same key, so still one audit file
    let files = fs::read_dir(tmp.path().join("JSON_Results")).unwrap().count();
    assert_eq!(files, 1);
}

#[tokio::test]
async fn test_non_200_is_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scout"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let ledger = ledger_for(&server, tmp.path());

    match ledger.persist(&acme(Some(2024))).await {
        PersistOutcome::RemoteError(reason) => assert!(reason.contains("201")),
        other => panic!("expected remote error, got {:?}", other),
    }
    assert_eq!(ledger.confirmed_count(), 0);
}

#[tokio::test]
async fn test_remote_error_leaves_source_in_backlog() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let reports = tmp.path().join("ESG_Reports");
    fs::create_dir(&reports).unwrap();
    fs::write(reports.join("acme.pdf"), b"%PDF").unwrap();

    let ledger = ledger_for(&server, tmp.path());
    let outcome = ledger.persist(&acme(Some(2024))).await;
    assert!(!outcome.is_confirmed());

    // Nothing archived, so the next scan still lists the report
    let backlog = ledger.processed().backlog(&reports, &exts()).unwrap();
    assert_eq!(backlog, vec![reports.join("acme.pdf")]);
}

#[tokio::test]
async fn test_archive_removes_source_from_backlog() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    let reports = tmp.path().join("ESG_Reports");
    fs::create_dir(&reports).unwrap();
    fs::write(reports.join("acme.pdf"), b"%PDF").unwrap();
    fs::write(reports.join("beta.pdf"), b"%PDF").unwrap();

    let ledger = ledger_for(&server, tmp.path());
    let destination = ledger.archive(&reports.join("acme.pdf")).unwrap();

    assert_eq!(destination, tmp.path().join("Processed").join("acme.pdf"));
    let backlog = ledger.processed().backlog(&reports, &exts()).unwrap();
    assert_eq!(backlog, vec![reports.join("beta.pdf")]);
}

#[tokio::test]
async fn test_unreachable_store_is_remote_error() {
    let tmp = TempDir::new().unwrap();
    let remote = RemoteStore::new("http://127.0.0.1:9/api/scout", Duration::from_secs(2)).unwrap();
    let ledger = StoreLedger::new(
        AuditLog::new(tmp.path().join("JSON_Results")),
        remote,
        ProcessedArchive::new(tmp.path().join("Processed")),
    );

    let outcome = ledger.persist(&acme(None)).await;

    assert!(matches!(outcome, PersistOutcome::RemoteError(_)));
    // The audit copy is written before the push
    assert!(tmp.path().join("JSON_Results").join("Acme_Corp_Unknown.json").is_file());
}
