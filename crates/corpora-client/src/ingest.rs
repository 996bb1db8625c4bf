//! Content ingestion.
//!
//! [`Ingestor`] stages metadata (and a text draft) between submissions,
//! submits file content as multipart and raw text as JSON, and refreshes
//! the catalog after a successful ingest. Submission failures revoke the
//! session, same policy as the catalog.

use std::sync::Arc;
use std::time::Instant;

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{info, instrument};

use corpora_core::{Error, KeyValueSet, Result};

use crate::catalog::Catalog;
use crate::connection::Connection;

/// Fallback MIME type for file ingestion.
const OCTET_STREAM: &str = "application/octet-stream";

/// Body of `POST /ingest/text`.
#[derive(Debug, Serialize)]
struct IngestTextRequest {
    content: String,
    metadata: Map<String, Value>,
}

/// Submits file or text content plus staged metadata.
pub struct Ingestor {
    conn: Arc<Connection>,
    catalog: Arc<Catalog>,
    metadata: Mutex<KeyValueSet>,
    text: Mutex<String>,
    guard: Mutex<()>,
}

impl Ingestor {
    pub fn new(conn: Arc<Connection>, catalog: Arc<Catalog>) -> Self {
        Self {
            conn,
            catalog,
            metadata: Mutex::new(KeyValueSet::new()),
            text: Mutex::new(String::new()),
            guard: Mutex::new(()),
        }
    }

    /// Stage a metadata pair for the next submission. Empty keys or
    /// values are ignored.
    pub async fn add_metadata(&self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.lock().await.add(key, value);
    }

    pub async fn remove_metadata(&self, index: usize) {
        self.metadata.lock().await.remove(index);
    }

    pub async fn metadata(&self) -> KeyValueSet {
        self.metadata.lock().await.clone()
    }

    /// Replace the staged text draft.
    pub async fn set_text(&self, text: impl Into<String>) {
        *self.text.lock().await = text.into();
    }

    pub async fn text(&self) -> String {
        self.text.lock().await.clone()
    }

    /// Submit file content with the staged metadata.
    ///
    /// On success the staged metadata is cleared and the catalog
    /// refreshed. On failure the session is revoked.
    #[instrument(skip(self, bytes), fields(subsystem = "ingest", op = "ingest_file", filename = %filename))]
    pub async fn ingest_file(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<()> {
        let _busy = self.guard.try_lock().map_err(|_| Error::Busy("ingest"))?;

        if filename.is_empty() {
            return Err(Error::InvalidInput("filename is required".to_string()));
        }
        if bytes.is_empty() {
            return Err(Error::InvalidInput("file is empty".to_string()));
        }
        let api = self.conn.api().await?;

        let metadata = Value::Object(self.metadata.lock().await.to_object());
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type.unwrap_or(OCTET_STREAM))
            .map_err(|e| Error::InvalidInput(format!("invalid content type: {}", e)))?;
        let form = Form::new()
            .part("file", part)
            .text("metadata", metadata.to_string());

        let start = Instant::now();
        if let Err(e) = api.post_multipart("/ingest/file", form).await {
            self.conn
                .teardown(format!("File ingestion failed: {}", e))
                .await;
            return Err(e);
        }
        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            "file ingested"
        );

        self.metadata.lock().await.clear();
        self.catalog.refresh().await?;
        Ok(())
    }

    /// Submit the staged text draft with the staged metadata.
    ///
    /// On success the draft and metadata are cleared and the catalog
    /// refreshed. On failure the session is revoked and the draft kept.
    #[instrument(skip(self), fields(subsystem = "ingest", op = "ingest_text"))]
    pub async fn ingest_text(&self) -> Result<()> {
        let _busy = self.guard.try_lock().map_err(|_| Error::Busy("ingest"))?;

        let content = self.text.lock().await.clone();
        if content.trim().is_empty() {
            return Err(Error::InvalidInput("text is empty".to_string()));
        }
        let api = self.conn.api().await?;

        let request = IngestTextRequest {
            content,
            metadata: self.metadata.lock().await.to_object(),
        };

        let start = Instant::now();
        let result: Result<Value> = api.post_json("/ingest/text", &request).await;
        if let Err(e) = result {
            self.conn
                .teardown(format!("Text ingestion failed: {}", e))
                .await;
            return Err(e);
        }
        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            "text ingested"
        );

        self.text.lock().await.clear();
        self.metadata.lock().await.clear();
        self.catalog.refresh().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::ClientConfig;

    fn ingestor() -> Ingestor {
        let conn = Arc::new(Connection::new(ClientConfig::default()));
        let catalog = Arc::new(Catalog::new(conn.clone()));
        Ingestor::new(conn, catalog)
    }

    #[tokio::test]
    async fn test_ingest_text_rejects_empty_draft() {
        let ingestor = ingestor();
        let err = ingestor.ingest_text().await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_ingest_file_rejects_empty_input() {
        let ingestor = ingestor();
        assert!(matches!(
            ingestor.ingest_file("", vec![1], None).await.unwrap_err(),
            Error::InvalidInput(_)
        ));
        assert!(matches!(
            ingestor
                .ingest_file("a.txt", Vec::new(), None)
                .await
                .unwrap_err(),
            Error::InvalidInput(_)
        ));
    }

    #[tokio::test]
    async fn test_ingest_requires_session() {
        let ingestor = ingestor();
        ingestor.set_text("some content").await;
        let err = ingestor.ingest_text().await.unwrap_err();
        assert!(matches!(err, Error::NoSession));
        // Draft survives the rejection.
        assert_eq!(ingestor.text().await, "some content");
    }

    #[tokio::test]
    async fn test_metadata_staging() {
        let ingestor = ingestor();
        ingestor.add_metadata("dept", "research").await;
        ingestor.add_metadata("", "ignored").await;
        ingestor.add_metadata("dept", "sales").await;

        let staged = ingestor.metadata().await;
        assert_eq!(staged.len(), 2);
        assert_eq!(staged.to_object()["dept"], "sales");

        ingestor.remove_metadata(1).await;
        assert_eq!(ingestor.metadata().await.to_object()["dept"], "research");
    }
}
