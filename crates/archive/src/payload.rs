//! Read-once payload handles
//!
//! Archive entries can only be read while the tar reader sits on them, and the
//! decompression stream cannot be rewound. Meta and content bytes are therefore
//! drained into a run-scoped scratch area ([`Spool`]) the moment their entry is
//! seen, and the resulting [`SpooledPayload`] is a move-only handle: writing it
//! out consumes it, so a second read cannot be expressed.
//!
//! The build direction uses [`SourceFile`], a move-only handle on a file in the
//! source tree.

use crate::error::{PackageError, PackageResult};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// Run-scoped scratch area for spooled entry bytes
///
/// The directory and everything in it is removed when the spool is dropped,
/// whether the run succeeded or not.
#[derive(Debug)]
pub struct Spool {
    dir: TempDir,
    next: u64,
}

impl Spool {
    /// Create a scratch area under `parent`, or the system temp directory
    pub fn new(parent: Option<&Path>) -> PackageResult<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("unitypack-");
        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };
        debug!("Scratch area at {}", dir.path().display());
        Ok(Spool { dir, next: 0 })
    }

    /// Location of the scratch area
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Drain `reader` into a new scratch file
    pub fn capture<R: Read>(&mut self, reader: &mut R) -> io::Result<SpooledPayload> {
        let path = self.dir.path().join(format!("{:08}.bin", self.next));
        self.next += 1;

        let mut out = BufWriter::new(File::create(&path)?);
        let len = io::copy(reader, &mut out)?;
        out.flush()?;

        Ok(SpooledPayload { path, len })
    }
}

/// Entry bytes held in the scratch area, readable once
#[derive(Debug)]
pub struct SpooledPayload {
    path: PathBuf,
    len: u64,
}

impl SpooledPayload {
    /// Number of bytes held
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Check if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move the bytes to `dest`, overwriting any existing file
    ///
    /// Renames when the scratch area shares a filesystem with `dest`, copies
    /// otherwise.
    pub fn write_to(self, dest: &Path) -> io::Result<u64> {
        if fs::rename(&self.path, dest).is_ok() {
            return Ok(self.len);
        }
        let written = fs::copy(&self.path, dest)?;
        let _ = fs::remove_file(&self.path);
        Ok(written)
    }
}

/// File in the build source tree, opened once during serialization
#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
}

impl SourceFile {
    /// Wrap a source path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SourceFile { path: path.into() }
    }

    /// Source location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file for streaming
    pub fn open(self) -> PackageResult<(File, fs::Metadata)> {
        let file = File::open(&self.path)
            .map_err(|e| PackageError::stream(self.path.display().to_string(), e))?;
        let metadata = file
            .metadata()
            .map_err(|e| PackageError::stream(self.path.display().to_string(), e))?;
        Ok((file, metadata))
    }
}
