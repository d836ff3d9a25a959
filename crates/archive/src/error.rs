//! Package error types

use std::path::PathBuf;
use thiserror::Error;
use unitypack_core::CoreError;

/// Result type for package operations
pub type PackageResult<T> = std::result::Result<T, PackageError>;

/// Errors raised while reading, extracting or building packages
#[derive(Debug, Error)]
pub enum PackageError {
    /// The input package does not exist
    #[error("package not found: {}", .0.display())]
    PackageNotFound(PathBuf),

    /// The output directory does not exist
    #[error("output directory not found: {}", .0.display())]
    OutputDirNotFound(PathBuf),

    /// The build source directory does not exist
    #[error("source directory not found: {}", .0.display())]
    SourceDirNotFound(PathBuf),

    /// The container could not be decoded
    #[error("archive error: {0}")]
    Archive(String),

    /// I/O failed while an entry's bytes were being copied
    #[error("stream failure on {entry}: {source}")]
    Stream {
        /// Entry name or destination being copied
        entry: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A meta document could not be used
    #[error("invalid meta document {}: {reason}", path.display())]
    InvalidMeta {
        /// Meta file
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Walking the source tree failed
    #[error("directory walk failed: {0}")]
    Walk(String),

    /// Error from the correlation core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Other I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PackageError {
    /// Create an archive decoding error
    pub fn archive(message: impl Into<String>) -> Self {
        PackageError::Archive(message.into())
    }

    /// Create a streaming error for `entry`
    pub fn stream(entry: impl Into<String>, source: std::io::Error) -> Self {
        PackageError::Stream {
            entry: entry.into(),
            source,
        }
    }

    /// Create an invalid meta document error
    pub fn invalid_meta(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PackageError::InvalidMeta {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if the run was rejected before producing any output
    pub fn is_fatal_setup(&self) -> bool {
        matches!(
            self,
            PackageError::PackageNotFound(_)
                | PackageError::OutputDirNotFound(_)
                | PackageError::SourceDirNotFound(_)
        )
    }

    /// Check if the run aborted mid-stream
    pub fn is_streaming(&self) -> bool {
        matches!(self, PackageError::Stream { .. } | PackageError::Archive(_))
    }
}

impl From<walkdir::Error> for PackageError {
    fn from(e: walkdir::Error) -> Self {
        PackageError::Walk(e.to_string())
    }
}
