//! Error types for calls against the Plurk API.

use thiserror::Error;

use crate::oauth::SigningError;

/// Failures surfaced by the Plurk HTTP client.
///
/// An empty search result is not an error; operations return an empty list
/// in that case.
#[derive(Debug, Error)]
pub enum PlurkError {
    /// Connection-level failure: DNS, TCP, TLS or timeout.
    #[error("request error: {0}")]
    Transport(String),

    /// The response body was not a well-formed JSON document.
    #[error("error parsing response data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Plurk answered with a non-success status and a JSON error body.
    #[error("Plurk API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request could not be signed.
    #[error("request signing failed: {0}")]
    Signing(#[from] SigningError),
}

impl From<reqwest::Error> for PlurkError {
    fn from(e: reqwest::Error) -> Self {
        PlurkError::Transport(e.to_string())
    }
}
