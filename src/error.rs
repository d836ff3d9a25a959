//! Unified error types for unitypack.
//!
//! Wraps the per-crate errors into one type with stable classification
//! helpers.

use std::path::PathBuf;
use thiserror::Error;
use unitypack_archive::PackageError;
use unitypack_core::CoreError;

/// All unitypack errors.
#[derive(Debug, Error)]
pub enum Error {
    /// An input or output location does not exist
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The package could not be decoded
    #[error("corrupt package: {0}")]
    Corrupt(String),

    /// Copying an entry's bytes failed mid-run
    #[error("stream failure on {entry}: {source}")]
    Stream {
        /// Entry or destination being copied
        entry: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A meta document in the source tree is unusable
    #[error("invalid meta document {}: {reason}", path.display())]
    InvalidMeta {
        /// Meta file
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for unitypack operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a not-found error.
    ///
    /// Not-found errors are raised before any output is produced.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if the run aborted partway through the package.
    pub fn is_streaming(&self) -> bool {
        matches!(self, Error::Stream { .. } | Error::Corrupt(_))
    }
}

impl From<PackageError> for Error {
    fn from(e: PackageError) -> Self {
        match e {
            PackageError::PackageNotFound(path)
            | PackageError::OutputDirNotFound(path)
            | PackageError::SourceDirNotFound(path) => Error::NotFound(path),
            PackageError::Archive(msg) => Error::Corrupt(msg),
            PackageError::Stream { entry, source } => Error::Stream { entry, source },
            PackageError::InvalidMeta { path, reason } => Error::InvalidMeta { path, reason },
            PackageError::Walk(msg) => Error::Io(std::io::Error::other(msg)),
            PackageError::Core(core) => core.into(),
            PackageError::Io(io) => Error::Io(io),
        }
    }
}

impl From<CoreError> for Error {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::CreateDir { path, source } => Error::Stream {
                entry: path.display().to_string(),
                source,
            },
        }
    }
}
