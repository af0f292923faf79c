//! Fetch error types.

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for transport operations.
///
/// These propagate to callers untouched; nothing is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("Unexpected status {status} from {url}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
        /// Response body, as text.
        body: String,
    },

    /// Response body is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response JSON lacks an expected key.
    #[error("Missing key in response: {0}")]
    MissingKey(String),

    /// Response JSON has an unexpected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A template slot has no value.
    #[error("Missing parameter {name} for template {template}")]
    MissingParameter {
        /// Slot name.
        name: String,
        /// Template being rendered.
        template: String,
    },

    /// Rendered URL does not parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Identification header value is not a valid header.
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader {
        /// Header name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}
