//! HTTP error types

/// Error type for HTTP operations
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid header value for {name}")]
    InvalidHeader { name: &'static str },

    #[error("Invalid JSON from {url}: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl HttpError {
    /// Whether the failure happened before a response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, HttpError::NetworkError(_))
    }
}
