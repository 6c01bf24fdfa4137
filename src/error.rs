use thiserror::Error;

/// Why a response was rejected before its body was looked at
#[derive(Debug, Error)]
pub enum ResponseFailure {
    /// Server answered with a status outside 200..=299
    #[error("HTTP status {0}")]
    Status(u16),
    /// Request never produced a response (DNS, TLS, timeout, ...)
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Unified error type for catalog data access
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Configured or derived URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Non-2xx status or transport error
    #[error("Invalid server response: {0}")]
    InvalidServerResponse(ResponseFailure),
    /// Response bytes are not a decodable image
    #[error("Invalid image data from {url}: {reason}")]
    InvalidImageData { url: String, reason: String },
    /// Payload does not match the expected JSON shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn status(status: u16) -> Self {
        CatalogError::InvalidServerResponse(ResponseFailure::Status(status))
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        CatalogError::InvalidServerResponse(ResponseFailure::Transport(reason.into()))
    }

    /// True when the server reported the requested resource as missing
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidServerResponse(ResponseFailure::Status(404))
        )
    }

    /// Short message suitable for an alert shown to the user
    pub fn user_message(&self) -> &'static str {
        match self {
            CatalogError::InvalidUrl(_) => "The catalog address is invalid.",
            CatalogError::InvalidServerResponse(_) => {
                "The catalog server could not be reached. Please try again."
            }
            CatalogError::InvalidImageData { .. } => "The card image could not be displayed.",
            CatalogError::Decode(_) => "The catalog returned data in an unexpected format.",
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::transport(err.to_string())
    }
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failure of the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type alias for key-value store operations
pub type StoreResult<T> = Result<T, StoreError>;
