//! Load errors.

use appbuild_core::ValidationError;
use std::path::PathBuf;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors that can occur while reading or writing configuration files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File missing or unreadable
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File is not the expected JSON document
    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },

    /// Document parsed but violates a configuration rule
    #[error("invalid {}: {source}", .path.display())]
    Invalid {
        /// File that failed
        path: PathBuf,
        /// Rule that was broken
        source: ValidationError,
    },

    /// Top-level JSON value is not an object
    #[error("{}: expected a JSON object", .path.display())]
    NotAnObject {
        /// File that failed
        path: PathBuf,
    },

    /// Build counter cannot be advanced any further
    #[error("{}: buildNumber is at its maximum and cannot be incremented", .path.display())]
    BuildNumberOverflow {
        /// File that failed
        path: PathBuf,
    },

    /// Write-back failed
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
}
