use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures reported by a key/value store call.
pub enum StoreError {
    /// The storage backend is not reachable in the current environment.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// The backend rejected or failed the request.
    #[error("storage backend failure: {0}")]
    Backend(String),
    /// A stored value could not be encoded or decoded.
    #[error("stored value serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
