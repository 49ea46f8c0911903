//! Error types for signing and vendor API calls

/// Errors from roster signing and OneClick operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Extract node does not exist on response\n{body}\n{endpoint}\n{node}")]
    ExtractNode {
        body: String,
        endpoint: String,
        node: String,
    },

    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::InvalidUrl(e.to_string())
    }
}

/// Result alias for crate operations.
pub type Result<T> = std::result::Result<T, Error>;
