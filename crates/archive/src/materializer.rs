//! Materializer
//!
//! Writes a collected ledger into a destination tree. Every record is
//! dispatched on its readiness; incomplete records are reported and skipped,
//! and the run carries on. The destination directories must already exist
//! (see [`DirectoryPlan`](unitypack_core::DirectoryPlan)).

use crate::error::{PackageError, PackageResult};
use crate::observer::Observer;
use crate::options::META_FILE_SUFFIX;
use crate::payload::SpooledPayload;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;
use unitypack_core::{logical_to_relative, AssetId, Ledger, Part, Readiness};

/// A record that could not be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteAsset {
    /// Identifier
    pub id: AssetId,
    /// Logical path, if one was seen
    pub path: Option<String>,
    /// Parts that never arrived
    pub missing: Vec<Part>,
}

impl fmt::Display for IncompleteAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing: Vec<&str> = self.missing.iter().map(Part::as_str).collect();
        write!(
            f,
            "Asset {} ({}) is not ready to extract. Maybe some files are missing. (missing: {})",
            self.id,
            self.path.as_deref().unwrap_or(""),
            missing.join(", ")
        )
    }
}

/// Outcome of an extraction
#[derive(Debug, Default, Clone)]
pub struct ExtractReport {
    /// Destination root
    pub output: PathBuf,
    /// Entry count from the counting pass, if it ran
    pub entries_total: Option<usize>,
    /// Entries seen by the collecting pass
    pub entries_seen: usize,
    /// Records in the ledger
    pub assets: usize,
    /// Directories created by the planner
    pub directories_created: usize,
    /// Records written with meta and content
    pub ready: usize,
    /// Records written with meta only
    pub meta_only: usize,
    /// Records written with content only
    pub asset_only: usize,
    /// Records skipped
    pub incomplete: Vec<IncompleteAsset>,
    /// Entries matching no role
    pub unrecognized: Vec<String>,
    /// `pathname` entries whose path was rejected
    pub rejected_paths: Vec<String>,
    /// Whether the package carries a cover image
    pub has_cover: bool,
}

impl ExtractReport {
    /// Number of records written in any form
    pub fn extracted(&self) -> usize {
        self.ready + self.meta_only + self.asset_only
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} assets: {} extracted ({} ready, {} folders/meta-only, {} content-only), {} incomplete, {} unrecognized entries",
            self.assets,
            self.extracted(),
            self.ready,
            self.meta_only,
            self.asset_only,
            self.incomplete.len(),
            self.unrecognized.len()
        )
    }
}

/// Writes ledger records under a destination root
pub struct Materializer<'a> {
    root: &'a Path,
}

impl<'a> Materializer<'a> {
    /// Create a materializer for `root`
    pub fn new(root: &'a Path) -> Self {
        Materializer { root }
    }

    /// Destination of a record's content
    pub fn asset_path(&self, logical_path: &str) -> PathBuf {
        self.root.join(logical_to_relative(logical_path))
    }

    /// Destination of a record's meta document
    pub fn meta_path(&self, logical_path: &str) -> PathBuf {
        let mut path = self.asset_path(logical_path).into_os_string();
        path.push(META_FILE_SUFFIX);
        PathBuf::from(path)
    }

    /// Write every record, consuming the ledger
    ///
    /// Fills the per-state counters and `incomplete` of `report`. An I/O error
    /// while copying aborts the run; files already written stay in place.
    pub fn run(
        &self,
        ledger: Ledger<SpooledPayload>,
        report: &mut ExtractReport,
        observer: &mut dyn Observer,
    ) -> PackageResult<()> {
        for record in ledger.into_records() {
            let parts = record.into_parts();
            match (parts.readiness, parts.logical_path, parts.meta, parts.asset) {
                (Readiness::Ready, Some(path), Some(meta), Some(asset)) => {
                    self.write(meta, &self.meta_path(&path))?;
                    self.write(asset, &self.asset_path(&path))?;
                    report.ready += 1;
                    observer.tick(&format!("Extracted {}...", path));
                }
                (Readiness::MetaOnly, Some(path), Some(meta), _) => {
                    self.write(meta, &self.meta_path(&path))?;
                    report.meta_only += 1;
                    let kind = if parts.is_folder { "Folder" } else { "MetaOnly" };
                    observer.tick(&format!("Extracted ({}) {}...", kind, path));
                }
                (Readiness::AssetOnly, Some(path), _, Some(asset)) => {
                    self.write(asset, &self.asset_path(&path))?;
                    report.asset_only += 1;
                    observer.tick(&format!("Extracted (PureFile) {}...", path));
                }
                (Readiness::Incomplete { missing }, path, _, _) => {
                    let incomplete = IncompleteAsset {
                        id: parts.id,
                        path,
                        missing,
                    };
                    observer.warning(&format!("!!! {}", incomplete));
                    observer.tick(&format!("Skipping {}...", incomplete.id));
                    report.incomplete.push(incomplete);
                }
                (readiness, _, _, _) => {
                    // Flags are only set together with their payloads
                    return Err(PackageError::archive(format!(
                        "asset {} is {} but its payload is gone",
                        parts.id, readiness
                    )));
                }
            }
        }
        Ok(())
    }

    fn write(&self, payload: SpooledPayload, dest: &Path) -> PackageResult<()> {
        let len = payload
            .write_to(dest)
            .map_err(|e| PackageError::stream(dest.display().to_string(), e))?;
        debug!("Wrote {} bytes to {}", len, dest.display());
        Ok(())
    }
}
