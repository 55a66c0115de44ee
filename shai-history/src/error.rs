//! Error types for history storage.

/// Failures that can occur at the history store boundary.
///
/// Only [`HistoryError::StorageUnavailable`] ever reaches callers (from
/// `clear`); the store absorbs everything else with a log line.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The backing key/value storage rejected a read, write or delete.
    #[error("history storage unavailable: {0}")]
    StorageUnavailable(String),
    /// The persisted value is not a valid serialized history.
    #[error("persisted history is corrupt: {0}")]
    CorruptPersistedData(#[from] serde_json::Error),
}

impl HistoryError {
    pub(crate) fn storage(err: anyhow::Error) -> Self {
        Self::StorageUnavailable(format!("{err:#}"))
    }
}
