//! Error types

/// Errors that can occur while talking to the users endpoint.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Non-2xx HTTP response from the endpoint.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// Network error during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }
}
