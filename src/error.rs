//! Error types for the print cost ledger.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid import data: {message}")]
    InvalidImport { message: String },

    #[error("Duplicate job id {id}")]
    DuplicateJobId { id: u64 },

    #[error("Invalid job id {id}: ids must be between 1 and {max}", max = crate::config::MAX_JOB_ID)]
    InvalidJobId { id: u64 },

    #[error("Unknown field '{field}'")]
    UnknownField { field: String },

    #[error("Store {path} could not be read: {message}")]
    CorruptStore { path: PathBuf, message: String },

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Refusing to start with default credentials; change them or allow them explicitly")]
    DefaultCredentials,

    #[error("Backup interval must be greater than zero")]
    ZeroBackupInterval,

    #[error("Fallback store location is unavailable on this platform")]
    NoFallbackLocation,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LedgerError {
    /// Whether this error should stop the process at startup.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LedgerError::EmptyPassword
                | LedgerError::DefaultCredentials
                | LedgerError::ZeroBackupInterval
        )
    }
}

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
