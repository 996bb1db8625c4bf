//! Document catalog synchronization.
//!
//! Mirrors the server's document list locally. A refresh replaces the
//! whole catalog — there is no incremental merge — and any failure tears
//! the connection down rather than leaving a stale catalog behind.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use tracing::{debug, instrument};

use corpora_core::{CatalogEntry, DocumentRecord, Result};

use crate::connection::Connection;

/// Local mirror of the server's document list.
pub struct Catalog {
    conn: Arc<Connection>,
    entries: RwLock<Vec<CatalogEntry>>,
}

impl Catalog {
    pub fn new(conn: Arc<Connection>) -> Self {
        Self {
            conn,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the remote document list and replace the local catalog.
    ///
    /// Requires a connected session. Fail-closed: any failure revokes the
    /// session before the error propagates.
    #[instrument(skip(self), fields(subsystem = "catalog", op = "refresh"))]
    pub async fn refresh(&self) -> Result<Vec<CatalogEntry>> {
        let api = self.conn.api().await?;

        let start = Instant::now();
        let records: Vec<DocumentRecord> = match api.get_json("/documents").await {
            Ok(records) => records,
            Err(e) => {
                self.conn
                    .teardown(format!("Failed to fetch documents: {}", e))
                    .await;
                return Err(e);
            }
        };

        let mapped: Vec<CatalogEntry> = records.into_iter().map(CatalogEntry::from_record).collect();
        debug!(
            doc_count = mapped.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "catalog replaced"
        );

        let mut entries = self.entries.write().await;
        *entries = mapped.clone();
        Ok(mapped)
    }

    /// Cloned snapshot of the catalog, in fetch order.
    pub async fn entries(&self) -> Vec<CatalogEntry> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpora_core::Error;

    use crate::config::ClientConfig;

    #[tokio::test]
    async fn test_refresh_requires_session() {
        let conn = Arc::new(Connection::new(ClientConfig::default()));
        let catalog = Catalog::new(conn);
        let err = catalog.refresh().await.unwrap_err();
        assert!(matches!(err, Error::NoSession));
        assert!(catalog.is_empty().await);
    }
}
