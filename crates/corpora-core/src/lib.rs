//! # corpora-core
//!
//! Core types, errors, and credential handling for the corpora client.
//!
//! This crate provides the foundational data structures the corpora-client
//! crate builds its session and workflow layer on. It performs no I/O.

pub mod credential;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod models;

// Re-export commonly used types at crate root
pub use credential::{CredentialError, ParsedCredential};
pub use error::{Error, Result};
pub use metadata::{KeyValue, KeyValueSet};
pub use models::{
    CatalogEntry, CompletionResponse, ConversationMessage, DeliveryStatus, DocumentRecord,
    MessageRole, UNTITLED_DOCUMENT,
};
