//! Error types for jar-archiver.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::interpolation::InterpolationError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for archiver operations.
///
/// Every variant maps to a process exit code. None of them are retried or
/// suppressed inside the library; they propagate to the caller unchanged.
#[derive(Error, Debug)]
pub enum ArchiverError {
    /// Invalid or missing layout configuration.
    #[error("{0}")]
    Configuration(String),

    /// A classpath entry template could not be expanded.
    #[error("Error interpolating artifact path for classpath entry: {0}")]
    Interpolation(#[from] InterpolationError),

    /// A manifest attribute or section is malformed.
    #[error("Invalid manifest: {0}")]
    Manifest(String),

    /// A user-supplied file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A user-supplied path exists but is not a regular file.
    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// Filesystem read/write or directory creation failed.
    #[error("{0}")]
    Io(String),

    /// User provided invalid arguments or an invalid build descriptor.
    #[error("{0}")]
    UserError(String),
}

impl ArchiverError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ArchiverError::Configuration(_) => exit_codes::USER_ERROR,
            ArchiverError::UserError(_) => exit_codes::USER_ERROR,
            ArchiverError::Interpolation(_) => exit_codes::MANIFEST_FAILURE,
            ArchiverError::Manifest(_) => exit_codes::MANIFEST_FAILURE,
            ArchiverError::NotFound(_) => exit_codes::IO_FAILURE,
            ArchiverError::NotAFile(_) => exit_codes::IO_FAILURE,
            ArchiverError::Io(_) => exit_codes::IO_FAILURE,
        }
    }

    /// Build an `Io` error that names the file and the operation that failed.
    pub(crate) fn io(action: &str, path: &std::path::Path, err: std::io::Error) -> Self {
        ArchiverError::Io(format!("failed to {} '{}': {}", action, path.display(), err))
    }
}

/// Result type alias for archiver operations.
pub type Result<T> = std::result::Result<T, ArchiverError>;
