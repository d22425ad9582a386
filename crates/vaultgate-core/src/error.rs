//! Error types for vaultgate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using vaultgate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for vaultgate operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Vault root directory does not exist at call time
    #[error("Vault root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Directory listing or file stat failed mid-scan
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
