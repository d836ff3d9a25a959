//! Error types for the correlation core

use std::path::PathBuf;
use thiserror::Error;

/// Result type for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors raised by the correlation core
///
/// The core is almost entirely pure; the only fallible operation is creating
/// the planned directory tree.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A planned directory could not be created
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}
