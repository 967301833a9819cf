//! Storage error types.
//!
//! Only the persistence backends produce these. The typed [`Persistence`]
//! wrapper catches them, so nothing above it ever sees a `StorageError`.
//!
//! [`Persistence`]: crate::storage::Persistence

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend refused the write (quota exhausted, read-only store).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;
