//! API error taxonomy.
//!
//! Transport failures, HTTP failures (status >= 400, body preserved
//! verbatim), and envelope rejections (`success=false`) are distinct
//! variants so callers can surface each the way the server intended.

/// Errors produced by the API client.
///
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("{operation} failed: {message}")]
    Rejected {
        operation: &'static str,
        message: String,
    },

    #[error("failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("login succeeded but no session token found")]
    MissingSessionToken,
}
