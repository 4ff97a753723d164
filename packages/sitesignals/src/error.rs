//! Typed errors for signal probes.
//!
//! Uses `thiserror` for library errors (not `anyhow`). These errors stay
//! internal to the crate: the public probe API absorbs every failure into a
//! neutral default, so one unreachable website never fails a caller.

use thiserror::Error;

/// Errors that can occur while probing a website.
#[derive(Debug, Error)]
pub enum SignalError {
    /// HTTP request failed (connection, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the target or a scoring API
    #[error("unexpected status {0}")]
    Status(u16),

    /// Response payload did not have the expected shape
    #[error("malformed payload: {0}")]
    Payload(String),
}
