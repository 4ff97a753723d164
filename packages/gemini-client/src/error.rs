//! Error types for the Gemini client.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Provider rate limit (HTTP 429). Callers may retry with backoff.
    #[error("Gemini rate limit exceeded")]
    RateLimited,

    /// API error (non-2xx response other than 429)
    #[error("Gemini API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GeminiError {
    /// Whether this error is a provider-side rate limit.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GeminiError::RateLimited)
    }
}
