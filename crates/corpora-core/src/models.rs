//! Core data models for the corpora client.
//!
//! Domain entities (catalog entries, conversation messages) plus the wire
//! shapes of the document service responses they are projected from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Display name used when the server record carries no filename.
pub const UNTITLED_DOCUMENT: &str = "Untitled Document";

// =============================================================================
// CATALOG TYPES
// =============================================================================

/// One document in the local mirror of the server's document list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    /// Server-assigned id, sole identity of the entry.
    pub id: String,
    pub display_name: String,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
    /// Arbitrary nested metadata attached at ingestion time.
    pub metadata: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
}

/// Wire shape of one element of the `GET /documents` response.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRecord {
    pub external_id: String,
    pub content_type: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default = "empty_object")]
    pub metadata: JsonValue,
    #[serde(default)]
    pub system_metadata: SystemMetadata,
}

/// Absent metadata reads as `{}`, never `null`.
fn empty_object() -> JsonValue {
    JsonValue::Object(serde_json::Map::new())
}

/// Server-managed metadata on a document record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemMetadata {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl CatalogEntry {
    /// Project a remote record into a catalog entry.
    ///
    /// A missing filename falls back to [`UNTITLED_DOCUMENT`]; a missing
    /// creation timestamp falls back to the current time.
    pub fn from_record(record: DocumentRecord) -> Self {
        let display_name = record
            .filename
            .clone()
            .unwrap_or_else(|| UNTITLED_DOCUMENT.to_string());
        let created_at = record.system_metadata.created_at.unwrap_or_else(Utc::now);
        Self {
            id: record.external_id,
            display_name,
            content_type: record.content_type,
            created_at,
            metadata: record.metadata,
            original_filename: record.filename,
        }
    }
}

// =============================================================================
// CONVERSATION TYPES
// =============================================================================

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Delivery outcome of a message.
///
/// User messages are appended optimistically before the query round-trip;
/// one whose query failed stays in the transcript marked `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Delivered,
    Failed,
}

/// One entry in the ordered conversation transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// UUIDv7: time-ordered and collision-free even for messages created
    /// in the same instant.
    pub id: Uuid,
    pub text: String,
    pub role: MessageRole,
    pub status: DeliveryStatus,
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, MessageRole::User)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text, MessageRole::Assistant)
    }

    fn new(text: impl Into<String>, role: MessageRole) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            role,
            status: DeliveryStatus::Delivered,
            timestamp: Utc::now(),
        }
    }
}

// =============================================================================
// QUERY RESPONSE
// =============================================================================

/// Response body of `POST /query`.
///
/// Different service versions answer under different field names, so the
/// text is taken from the first present of `completion`, `text`, `answer`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub completion: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

impl CompletionResponse {
    /// Extract the answer text using the fallback field order.
    pub fn into_text(self) -> Option<String> {
        self.completion.or(self.text).or(self.answer)
    }
}
