//! Archive assembler: source tree scan
//!
//! Walks a source tree and builds a ledger from its meta sidecars. Each
//! `<name>.meta` file describes the sibling `<name>`, which is either a file
//! (content) or a directory (folder asset).

use crate::error::{PackageError, PackageResult};
use crate::meta::MetaDocument;
use crate::observer::Observer;
use crate::options::{BuildOptions, META_FILE_SUFFIX};
use crate::payload::SourceFile;
use std::path::{Path, PathBuf};
use tracing::debug;
use unitypack_core::Ledger;
use walkdir::WalkDir;

/// Builds a ledger from a source tree
pub struct PackageAssembler<'a> {
    root: PathBuf,
    options: &'a BuildOptions,
}

impl<'a> PackageAssembler<'a> {
    /// Create an assembler for the tree at `root`
    pub fn new(root: impl Into<PathBuf>, options: &'a BuildOptions) -> Self {
        PackageAssembler {
            root: root.into(),
            options,
        }
    }

    /// Walk the tree and correlate every meta sidecar with its sibling
    ///
    /// A non-folder asset whose sibling file is missing is kept without
    /// content and reported through the observer.
    pub fn scan(&self, observer: &mut dyn Observer) -> PackageResult<Ledger<SourceFile>> {
        if !self.root.is_dir() {
            return Err(PackageError::SourceDirNotFound(self.root.clone()));
        }

        let mut ledger = Ledger::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let meta_path = entry.path();
            let Some(sibling) = sibling_of(meta_path) else {
                continue;
            };

            let doc = MetaDocument::from_path(meta_path)?;
            let is_folder = doc.folder_asset || sibling.is_dir();
            let logical = self.options.logical_path(&self.relative_logical(&sibling)?);

            if let Some(existing) = ledger.get(doc.guid.as_str()).and_then(|r| r.logical_path()) {
                observer.warning(&format!(
                    "!!! Duplicate guid {}: {} replaces {}",
                    doc.guid, logical, existing
                ));
            }

            let record = ledger.create_or_update(doc.guid.clone(), logical);
            record.set_folder(is_folder);
            record.attach_meta(SourceFile::new(meta_path));
            if !is_folder {
                if sibling.is_file() {
                    record.attach_asset(SourceFile::new(&sibling));
                } else {
                    observer.warning(&format!(
                        "!!! Content for {} not found at {}",
                        doc.guid,
                        sibling.display()
                    ));
                }
            }
            debug!("Got {} ({})", meta_path.display(), doc.guid);
            observer.tick(&format!("Got {}...", meta_path.display()));
        }

        Ok(ledger)
    }

    /// Forward-slash path of `path` relative to the tree root
    fn relative_logical(&self, path: &Path) -> PackageResult<String> {
        let relative = path.strip_prefix(&self.root).map_err(|_| {
            PackageError::Walk(format!(
                "{} is outside {}",
                path.display(),
                self.root.display()
            ))
        })?;
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Ok(segments.join("/"))
    }
}

/// `Foo.txt.meta` → `Foo.txt`; `None` for non-meta files and bare `.meta`
fn sibling_of(meta_path: &Path) -> Option<PathBuf> {
    let name = meta_path.file_name()?.to_str()?;
    let stem = name.strip_suffix(META_FILE_SUFFIX)?;
    if stem.is_empty() {
        return None;
    }
    Some(meta_path.with_file_name(stem))
}
