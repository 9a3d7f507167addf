// ABOUTME: Error types for the string utility helpers.
// ABOUTME: Provides StringsError with an Io variant for the file-backed operations.

use thiserror::Error;

/// Errors that can occur in the file-backed string helpers.
#[derive(Debug, Error)]
pub enum StringsError {
    /// Reading or writing the underlying file failed.
    #[error("file operation failed: {0}")]
    Io(#[from] std::io::Error),
}
