//! Conversational querying.
//!
//! [`Chat`] owns the ordered conversation transcript and the staged draft
//! and filter set. Sending appends the user message optimistically before
//! the round-trip; on failure the message stays in the transcript marked
//! [`DeliveryStatus::Failed`], the draft is restored so the user keeps
//! their text, and the session is revoked.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use corpora_core::{
    CompletionResponse, ConversationMessage, DeliveryStatus, Error, KeyValueSet, Result,
};

use crate::catalog::Catalog;
use crate::connection::Connection;

/// Placeholder when the response carries none of the known answer fields.
const NO_RESPONSE: &str = "No response";

/// Body of `POST /query`.
///
/// `filters` is omitted from the wire entirely when no filter is staged;
/// the service distinguishes "no filter" from "empty filter".
#[derive(Debug, Serialize)]
struct QueryRequest {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    filters: Option<Map<String, Value>>,
    max_tokens: u32,
    temperature: f32,
}

/// An ordered conversation against the connected session.
pub struct Chat {
    conn: Arc<Connection>,
    catalog: Arc<Catalog>,
    transcript: RwLock<Vec<ConversationMessage>>,
    filters: Mutex<KeyValueSet>,
    draft: Mutex<String>,
    guard: Mutex<()>,
}

impl Chat {
    pub fn new(conn: Arc<Connection>, catalog: Arc<Catalog>) -> Self {
        Self {
            conn,
            catalog,
            transcript: RwLock::new(Vec::new()),
            filters: Mutex::new(KeyValueSet::new()),
            draft: Mutex::new(String::new()),
            guard: Mutex::new(()),
        }
    }

    /// Stage a metadata filter for subsequent queries. Empty keys or
    /// values are ignored.
    pub async fn add_filter(&self, key: impl Into<String>, value: impl Into<String>) {
        self.filters.lock().await.add(key, value);
    }

    pub async fn remove_filter(&self, index: usize) {
        self.filters.lock().await.remove(index);
    }

    pub async fn filters(&self) -> KeyValueSet {
        self.filters.lock().await.clone()
    }

    /// Replace the pending input text.
    pub async fn set_draft(&self, text: impl Into<String>) {
        *self.draft.lock().await = text.into();
    }

    pub async fn draft(&self) -> String {
        self.draft.lock().await.clone()
    }

    /// Cloned snapshot of the transcript, oldest first.
    pub async fn transcript(&self) -> Vec<ConversationMessage> {
        self.transcript.read().await.clone()
    }

    /// Send the pending draft as a query.
    ///
    /// Requires a connected session, a non-empty catalog, and a non-empty
    /// draft; all three are checked before any network call or transcript
    /// change. The user message is appended and the draft cleared before
    /// the round-trip; the assistant reply is appended on success.
    #[instrument(skip(self), fields(subsystem = "chat", op = "send"))]
    pub async fn send(&self) -> Result<()> {
        let _busy = self.guard.try_lock().map_err(|_| Error::Busy("query"))?;

        let api = self.conn.api().await?;
        if self.catalog.is_empty().await {
            return Err(Error::InvalidInput(
                "no documents ingested yet".to_string(),
            ));
        }
        let text = self.draft.lock().await.clone();
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("message is empty".to_string()));
        }

        // Optimistic update: show the user message immediately.
        let user_message = ConversationMessage::user(text.clone());
        let user_id = user_message.id;
        debug!(message_id = %user_id, "user message appended");
        self.transcript.write().await.push(user_message);
        self.draft.lock().await.clear();

        let filter_object = self.filters.lock().await.to_object();
        let request = QueryRequest {
            query: text.clone(),
            filters: (!filter_object.is_empty()).then_some(filter_object),
            max_tokens: self.conn.config().max_tokens,
            temperature: self.conn.config().temperature,
        };

        let start = Instant::now();
        match api
            .post_json::<_, CompletionResponse>("/query", &request)
            .await
        {
            Ok(response) => {
                let answer = response
                    .into_text()
                    .unwrap_or_else(|| NO_RESPONSE.to_string());
                info!(
                    duration_ms = start.elapsed().as_millis() as u64,
                    "assistant reply received"
                );
                self.transcript
                    .write()
                    .await
                    .push(ConversationMessage::assistant(answer));
                Ok(())
            }
            Err(e) => {
                self.mark_failed(user_id).await;
                *self.draft.lock().await = text;
                self.conn.teardown(format!("Query failed: {}", e)).await;
                Err(e)
            }
        }
    }

    async fn mark_failed(&self, id: Uuid) {
        let mut transcript = self.transcript.write().await;
        if let Some(message) = transcript.iter_mut().find(|m| m.id == id) {
            message.status = DeliveryStatus::Failed;
        }
    }
}
