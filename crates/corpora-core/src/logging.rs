//! Structured logging schema for the corpora client.
//!
//! All crates use these constants for consistent structured logging fields
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Session revoked, requires user attention |
//! | WARN  | Recoverable issue, operation rejected or slow |
//! | INFO  | Lifecycle events (connect, disconnect), operation completions |
//! | DEBUG | Decision points, intermediate values |
//! | TRACE | Per-item iteration (catalog entries, transcript appends) |

/// Subsystem originating the log event.
/// Values: "connection", "catalog", "ingest", "chat"
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name.
/// Examples: "connect", "refresh", "ingest_file", "send"
pub const OPERATION: &str = "op";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// HTTP status code of a failed request.
pub const STATUS: &str = "status";

/// Number of catalog entries after a refresh.
pub const DOC_COUNT: &str = "doc_count";

/// Conversation message UUID.
pub const MESSAGE_ID: &str = "message_id";
