//! Error types for the storage layer

use std::fmt;
use thiserror::Error;

use crate::error::{ErrorCode, ProfitShareError};

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A calculation with this id is already stored
    #[error("Conflict: calculation {0} already exists")]
    Conflict(String),

    /// Backend refused the write because it is full
    #[error("Storage quota exceeded: limit is {limit} calculations")]
    QuotaExceeded { limit: usize },

    /// Storage backend unavailable
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StorageError {
    /// Create a serialization error
    pub fn serialization<E: fmt::Display>(err: E) -> Self {
        Self::Serialization(err.to_string())
    }

    /// Create a conflict error
    pub fn conflict<E: fmt::Display>(id: E) -> Self {
        Self::Conflict(id.to_string())
    }

    /// Create an unavailable error
    pub fn unavailable<E: fmt::Display>(msg: E) -> Self {
        Self::Unavailable(msg.to_string())
    }

    /// Create a configuration error
    pub fn configuration<E: fmt::Display>(msg: E) -> Self {
        Self::Configuration(msg.to_string())
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err)
    }
}

/// Convert StorageError to ProfitShareError
impl From<StorageError> for ProfitShareError {
    fn from(err: StorageError) -> Self {
        let code = match &err {
            StorageError::Io(_) => ErrorCode::STORAGE_IO_ERROR,
            StorageError::Serialization(_) => ErrorCode::STORAGE_SERIALIZATION_ERROR,
            StorageError::Conflict(_) => ErrorCode::STORAGE_ALREADY_EXISTS,
            StorageError::QuotaExceeded { .. } => ErrorCode::STORAGE_QUOTA_EXCEEDED,
            StorageError::Unavailable(_) => ErrorCode::STORAGE_BACKEND_ERROR,
            StorageError::Configuration(_) => ErrorCode::CONFIG_INVALID_VALUE,
        };

        ProfitShareError::storage_with_code(code, err.to_string()).with_source(err)
    }
}
