//! Shared fixtures for the wiremock integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use corpora_client::{Catalog, ClientConfig, Connection};

/// Structurally valid three-segment bearer token.
pub const TOKEN: &str = "header.payload.signature";

pub const BEARER: &str = "Bearer header.payload.signature";

/// Build a composite connection string pointing at the mock server.
pub fn connection_string(server: &MockServer) -> String {
    let host_port = server.uri().trim_start_matches("http://").to_string();
    format!("corpora://tester:{}@{}", TOKEN, host_port)
}

/// Mount both handshake probes with success responses.
pub async fn mount_handshake(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health/ready"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

/// Connect a fresh Connection through the mounted handshake.
pub async fn connected(server: &MockServer) -> Arc<Connection> {
    let conn = Arc::new(Connection::new(ClientConfig::default()));
    conn.connect(&connection_string(server))
        .await
        .expect("handshake should succeed");
    conn
}

/// Mount `GET /documents` returning the given records.
pub async fn mount_documents(server: &MockServer, records: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(records))
        .mount(server)
        .await;
}

/// Connect and sync a one-document catalog.
pub async fn connected_with_catalog(server: &MockServer) -> (Arc<Connection>, Arc<Catalog>) {
    mount_documents(
        server,
        serde_json::json!([{
            "external_id": "doc_1",
            "content_type": "text/plain",
            "filename": "notes.txt"
        }]),
    )
    .await;
    let conn = connected(server).await;
    let catalog = Arc::new(Catalog::new(conn.clone()));
    catalog.refresh().await.expect("catalog refresh");
    (conn, catalog)
}
