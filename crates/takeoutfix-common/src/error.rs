//! Common error types used throughout takeoutfix.
//!
//! This module covers the failures of the filesystem-facing parts of the
//! engine: rename planning, randomness, and directory traversal.

use std::path::PathBuf;

/// Common error type for takeoutfix.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No free file name could be found for a rename.
    #[error("No free name for {} after {attempts} attempts", path.display())]
    RenameExhausted { path: PathBuf, attempts: usize },

    /// The operating system randomness source failed.
    #[error("Randomness unavailable: {0}")]
    RandomUnavailable(String),

    /// Directory traversal failed.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new RenameExhausted error.
    pub fn rename_exhausted(path: impl Into<PathBuf>, attempts: usize) -> Self {
        Self::RenameExhausted {
            path: path.into(),
            attempts,
        }
    }

    /// Create a new RandomUnavailable error.
    pub fn random_unavailable<S: Into<String>>(msg: S) -> Self {
        Self::RandomUnavailable(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
