//! Error types for the Music Assistant client

/// Result type alias for Music Assistant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the Music Assistant server
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed (transport level)
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while reading a response body
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server answered with an unexpected HTTP status
    #[error("{endpoint} returned HTTP status {code}")]
    Status { code: u16, endpoint: String },
}

impl Error {
    /// Create a status error for an endpoint
    pub fn status(code: u16, endpoint: impl Into<String>) -> Self {
        Self::Status {
            code,
            endpoint: endpoint.into(),
        }
    }
}
