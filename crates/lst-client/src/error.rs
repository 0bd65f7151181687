//! Selling-partner API client error types.

/// Errors from selling-partner API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The API returned a non-2xx status. The body is carried verbatim;
    /// a failed fetch is never treated as empty content.
    #[error("API {endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The token exchange failed.
    #[error("token exchange failed: {reason}")]
    Auth { reason: String },

    /// The HTTP client could not be constructed.
    #[error("client init error: {reason}")]
    ClientInit { reason: String },
}
