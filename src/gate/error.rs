//! Gate Module Error Types

/// Error types for record storage operations
///
/// Read-side problems (missing file, corrupt content) are not errors at
/// all: the store reports them as an absent record and the tracker starts
/// fresh. Only failures to persist a new count surface here.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to write the daily record to durable storage
    #[error("failed to persist daily record: {0}")]
    Write(String),

    /// Failed to serialize the daily record
    #[error("failed to serialize daily record: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Write(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialize(err.to_string())
    }
}
