//! Error types for the Apify client.

use thiserror::Error;

/// Result type for Apify client operations.
pub type Result<T> = std::result::Result<T, ApifyError>;

/// Apify client errors.
#[derive(Debug, Error)]
pub enum ApifyError {
    /// Network error (connection failed, timeout)
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response from the Apify API
    #[error("Apify API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Actor run ended in a non-success state
    #[error("Actor run failed with status {0}")]
    RunFailed(String),
}
