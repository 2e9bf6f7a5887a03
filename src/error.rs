//! Error types for the payment-tracker-rust library.
//!
//! [`TrackerError`] covers everything the library reports: store and I/O
//! failures, lookups that find nothing, and rejected backup files.

use thiserror::Error;

/// Errors that can occur in the payment-tracker-rust application.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Key-value store errors
    #[error("Store error: {0}")]
    Store(#[from] sled::Error),

    /// Payment not found by id
    #[error("Payment not found: {0}")]
    PaymentNotFound(i64),

    /// Contact not found by id
    #[error("Contact not found: {0}")]
    ContactNotFound(i64),

    /// Project not found by name
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backup file missing a required section
    #[error("Invalid backup file: {0}")]
    InvalidBackup(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// General error with context
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Result with TrackerError
pub type Result<T> = std::result::Result<T, TrackerError>;

impl From<anyhow::Error> for TrackerError {
    fn from(err: anyhow::Error) -> Self {
        TrackerError::Other(err.to_string())
    }
}
