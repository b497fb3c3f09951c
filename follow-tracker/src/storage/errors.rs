//! Error types for storage operations

use std::error::Error;
use std::fmt;

/// Error type for storage operations
#[derive(Debug)]
pub enum StorageError {
    /// Reading or writing the document failed
    Operation(String),

    /// Serialization/deserialization error
    Serialization(String),

    /// Data conversion error
    Conversion(String),

    /// Data not found
    NotFound(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Operation(msg) => write!(f, "Operation error: {}", msg),
            StorageError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::Conversion(msg) => write!(f, "Conversion error: {}", msg),
            StorageError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl Error for StorageError {}

/// Convert a YAML error to a storage error
impl From<serde_yaml::Error> for StorageError {
    fn from(err: serde_yaml::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Convert a CSV error to a storage error
impl From<csv::Error> for StorageError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            StorageError::Operation(err.to_string())
        } else {
            StorageError::Conversion(err.to_string())
        }
    }
}

/// Convert a standard IO error to a storage error
impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Operation(err.to_string())
    }
}

/// Convert a failed atomic rename to a storage error
impl From<tempfile::PersistError> for StorageError {
    fn from(err: tempfile::PersistError) -> Self {
        StorageError::Operation(err.error.to_string())
    }
}

// This allows StorageError to be converted to the top-level FollowTrackerError
impl From<StorageError> for crate::FollowTrackerError {
    fn from(err: StorageError) -> Self {
        crate::FollowTrackerError::Storage(err.to_string())
    }
}
