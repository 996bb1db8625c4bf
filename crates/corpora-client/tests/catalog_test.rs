//! Catalog synchronization against a mock service.

mod common;

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{connected, mount_documents};
use corpora_client::Catalog;
use corpora_core::{Error, UNTITLED_DOCUMENT};

#[tokio::test]
async fn test_refresh_projects_records_in_fetch_order() {
    let server = MockServer::start().await;
    common::mount_handshake(&server).await;
    mount_documents(
        &server,
        json!([
            {
                "external_id": "doc_a",
                "content_type": "application/pdf",
                "filename": "report.pdf",
                "metadata": {"dept": "research"},
                "system_metadata": {"created_at": "2026-03-01T09:30:00Z"}
            },
            {
                "external_id": "doc_b",
                "content_type": "text/plain"
            }
        ]),
    )
    .await;

    let conn = connected(&server).await;
    let catalog = Catalog::new(conn);
    let entries = catalog.refresh().await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "doc_a");
    assert_eq!(entries[0].display_name, "report.pdf");
    assert_eq!(entries[0].metadata["dept"], "research");
    assert_eq!(entries[1].id, "doc_b");
    assert_eq!(entries[1].display_name, UNTITLED_DOCUMENT);
    assert_eq!(entries[1].original_filename, None);
    assert_eq!(catalog.len().await, 2);
}

#[tokio::test]
async fn test_refresh_replaces_catalog_wholesale() {
    let server = MockServer::start().await;
    common::mount_handshake(&server).await;
    Mock::given(method("GET"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"external_id": "old_1", "content_type": "text/plain"},
            {"external_id": "old_2", "content_type": "text/plain"}
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let conn = connected(&server).await;
    let catalog = Catalog::new(conn);
    catalog.refresh().await.unwrap();
    assert_eq!(catalog.len().await, 2);

    // Second fetch returns a disjoint, smaller list; no merging happens.
    Mock::given(method("GET"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"external_id": "new_1", "content_type": "text/plain"}
        ])))
        .mount(&server)
        .await;

    let entries = catalog.refresh().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "new_1");
    assert_eq!(catalog.entries().await.len(), 1);
}

#[tokio::test]
async fn test_refresh_failure_revokes_session() {
    let server = MockServer::start().await;
    common::mount_handshake(&server).await;
    Mock::given(method("GET"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(500).set_body_string("storage unavailable"))
        .mount(&server)
        .await;

    let conn = connected(&server).await;
    let catalog = Catalog::new(Arc::clone(&conn));
    let err = catalog.refresh().await.unwrap_err();
    assert!(matches!(err, Error::RequestFailed { status: 500, .. }));

    let status = conn.status().await;
    assert!(!status.connected);
    assert!(status.last_error.unwrap().contains("storage unavailable"));
}
