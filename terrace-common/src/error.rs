//! Common error types for Terrace services

use thiserror::Error;

/// Common result type for Terrace operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared by the Terrace service crates
///
/// Only failure classes that cross a crate boundary live here; each
/// service keeps its own HTTP-facing error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error while preparing the data folder or database
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure with no more specific classification
    #[error("Internal error: {0}")]
    Internal(String),
}
