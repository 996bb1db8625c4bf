//! Client configuration.
//!
//! Request timing and generation parameters, resolvable from environment
//! variables with sensible defaults:
//!
//! - `CORPORA_TIMEOUT_SECS` — per-request timeout (default 30)
//! - `CORPORA_MAX_TOKENS` — completion budget per query (default 500)
//! - `CORPORA_TEMPERATURE` — sampling temperature (default 0.7)
//!
//! Generation parameters are fixed for the lifetime of a session; they are
//! not adjustable per message from this layer.

/// Default per-request timeout (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default completion token budget per query.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Default sampling temperature for queries.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Configuration for the client layer.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub request_timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl ClientConfig {
    /// Build from environment variables, falling back to defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        let request_timeout_secs = std::env::var("CORPORA_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let max_tokens = std::env::var("CORPORA_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let temperature = std::env::var("CORPORA_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);

        Self {
            request_timeout_secs,
            max_tokens,
            temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.max_tokens, 500);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
    }
}
