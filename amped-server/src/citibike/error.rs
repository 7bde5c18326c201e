//! Supply fetch error types.

use std::time::Duration;

/// Broad error category, as seen by callers that only care whether the
/// upstream was unreachable or sent something unexpected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Transport failure, timeout, non-2xx status or upstream-reported failure.
    Network,
    /// The response body did not have the expected shape.
    Decode,
}

/// Errors that can occur when fetching station supply.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (connection, TLS, reqwest-level timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The fetch did not complete within the configured bound
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// GraphQL response carried errors and no data
    #[error("upstream errors: {}", .messages.join("; "))]
    Upstream { messages: Vec<String> },

    /// Response body did not match the expected shape
    #[error("decode error: {message}")]
    Decode {
        message: String,
        body: Option<String>,
    },
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Decode { .. } => FetchErrorKind::Decode,
            FetchError::Http(_)
            | FetchError::Timeout(_)
            | FetchError::Api { .. }
            | FetchError::Upstream { .. } => FetchErrorKind::Network,
        }
    }
}
