//! API error types.

/// HTTP API error with status code and message.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Network/transport error.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

impl ApiError {
    /// Check if this is a 401 Unauthorized error.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }

    /// Check if this is a 404 Not Found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }
}
