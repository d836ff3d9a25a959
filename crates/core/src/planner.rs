//! Directory planner
//!
//! Computes every directory an extraction will write into, so the whole set can
//! be created up front. Per-file materialization then never has to create
//! intermediate directories or check for their existence.

use crate::error::{CoreError, CoreResult};
use crate::ledger::Ledger;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Deduplicated set of directories relative to a destination root
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectoryPlan {
    dirs: BTreeSet<PathBuf>,
}

impl DirectoryPlan {
    /// Plan the directories needed to materialize `ledger`
    ///
    /// Includes the parent of every set logical path. Folder-typed records
    /// carry no content entry, so their own path is included as well; a
    /// meta-only record that is not a folder only gets its parent.
    pub fn from_ledger<P>(ledger: &Ledger<P>) -> Self {
        let mut plan = DirectoryPlan::default();
        for record in ledger.iter() {
            let Some(path) = record.logical_path() else {
                continue;
            };
            let relative = logical_to_relative(path);
            if let Some(parent) = relative.parent() {
                plan.insert(parent.to_path_buf());
            }
            if record.is_folder() {
                plan.insert(relative);
            }
        }
        plan
    }

    fn insert(&mut self, dir: PathBuf) {
        if !dir.as_os_str().is_empty() {
            self.dirs.insert(dir);
        }
    }

    /// Number of planned directories
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Check if nothing needs to be created
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Planned directories, relative and sorted
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    /// Create every planned directory under `root`
    ///
    /// Returns the number of directories that did not exist before.
    pub fn create_all(&self, root: &Path) -> CoreResult<usize> {
        let mut created = 0;
        for dir in &self.dirs {
            let target = root.join(dir);
            if target.is_dir() {
                continue;
            }
            debug!("Creating {}", target.display());
            std::fs::create_dir_all(&target).map_err(|source| CoreError::CreateDir {
                path: target.clone(),
                source,
            })?;
            created += 1;
        }
        Ok(created)
    }
}

/// Convert a forward-slash logical path into a relative filesystem path
pub fn logical_to_relative(path: &str) -> PathBuf {
    path.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}

/// Check that a logical path stays inside the destination root
///
/// Rejects empty paths, absolute paths and any `..` segment.
pub fn is_safe_logical_path(path: &str) -> bool {
    if path.is_empty() || path.starts_with('/') || path.starts_with('\\') {
        return false;
    }
    let relative = logical_to_relative(path);
    if relative.as_os_str().is_empty() {
        return false;
    }
    relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
}
