//! Package reader
//!
//! Streams a gzip-compressed tar package and correlates its entries into a
//! [`Ledger`]. Entries are forward-only: each entry is fully drained (captured
//! or discarded) before the reader advances.
//!
//! Every pass opens its own file and decoder. A decompression stream cannot be
//! rewound, so the counting pass and the collecting pass never share one.

use crate::error::{PackageError, PackageResult};
use crate::meta::MetaDocument;
use crate::observer::Observer;
use crate::payload::{Spool, SpooledPayload};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tar::Archive;
use tracing::debug;
use unitypack_core::classifier::COVER_ENTRY;
use unitypack_core::{classify, is_safe_logical_path, AssetSummary, EntryKind, EntryRole, Ledger};

type PackageStream = GzDecoder<BufReader<File>>;

/// What a collecting pass saw besides the ledger itself
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CollectStats {
    /// Entries read, directories included
    pub entries: usize,
    /// Known extras skipped silently
    pub ignored: usize,
    /// Names of entries matching no role
    pub unrecognized: Vec<String>,
    /// `pathname` entries whose path was rejected
    pub rejected_paths: Vec<String>,
    /// Whether the reserved cover entry is present
    pub has_cover: bool,
}

/// Result of a collecting pass
#[derive(Debug)]
pub struct Collected<P> {
    /// Correlated records
    pub ledger: Ledger<P>,
    /// Pass statistics
    pub stats: CollectStats,
}

/// Listing of a package's assets
#[derive(Debug, Clone)]
pub struct PackageListing {
    /// One summary per asset, in identifier order
    pub assets: Vec<AssetSummary>,
    /// Pass statistics
    pub stats: CollectStats,
}

/// Reader for package archives
pub struct PackageReader;

impl PackageReader {
    /// Count all entries with an independent pass
    pub fn count_entries(path: &Path) -> PackageResult<usize> {
        let mut archive = Self::open(path)?;
        let mut count = 0;
        for entry in archive
            .entries()
            .map_err(|e| PackageError::archive(e.to_string()))?
        {
            entry.map_err(|e| PackageError::archive(e.to_string()))?;
            count += 1;
        }
        debug!("Counted {} entries in {}", count, path.display());
        Ok(count)
    }

    /// Collect every asset, spooling meta and content bytes into `spool`
    pub fn collect(
        path: &Path,
        spool: &mut Spool,
        observer: &mut dyn Observer,
    ) -> PackageResult<Collected<SpooledPayload>> {
        Self::collect_with(path, observer, |mut reader| spool.capture(&mut reader))
    }

    /// List assets without keeping any entry bytes
    pub fn list(path: &Path, observer: &mut dyn Observer) -> PackageResult<PackageListing> {
        let collected = Self::collect_with(path, observer, |reader| {
            io::copy(reader, &mut io::sink()).map(|_| ())
        })?;
        Ok(PackageListing {
            assets: collected.ledger.summaries(),
            stats: collected.stats,
        })
    }

    /// Collecting pass with a caller-supplied capture for meta/content bytes
    ///
    /// `capture` must drain the reader it is handed; the entry is gone once the
    /// pass advances. Meta documents are read into memory first so the folder
    /// marker can be checked, then handed to `capture`.
    pub fn collect_with<P, F>(
        path: &Path,
        observer: &mut dyn Observer,
        mut capture: F,
    ) -> PackageResult<Collected<P>>
    where
        F: FnMut(&mut dyn Read) -> io::Result<P>,
    {
        let mut archive = Self::open(path)?;
        let mut ledger = Ledger::new();
        let mut stats = CollectStats::default();

        for entry in archive
            .entries()
            .map_err(|e| PackageError::archive(e.to_string()))?
        {
            let mut entry = entry.map_err(|e| PackageError::archive(e.to_string()))?;
            stats.entries += 1;

            let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            if entry.header().entry_type().is_dir() {
                continue;
            }

            match classify(&name, EntryKind::Regular) {
                EntryRole::Pathname(id) => {
                    observer.tick(&format!("[{}] Reading (+--) {}...", ledger.len(), id));
                    let text = read_text(&mut entry, &name)?;
                    let logical = first_line(&text);
                    if is_safe_logical_path(logical) {
                        ledger.create_or_update(id, logical);
                    } else {
                        observer.warning(&format!(
                            "!!! Rejected path {:?} for asset {}",
                            logical, id
                        ));
                        stats.rejected_paths.push(logical.to_string());
                        ledger.get_or_create(id);
                    }
                }
                EntryRole::Meta(id) => {
                    observer.tick(&format!("[{}] Reading (-+-) {}...", ledger.len(), id));
                    let mut bytes = Vec::new();
                    entry
                        .read_to_end(&mut bytes)
                        .map_err(|e| PackageError::stream(&name, e))?;
                    let is_folder = MetaDocument::declares_folder(&bytes);
                    let payload =
                        capture(&mut bytes.as_slice()).map_err(|e| PackageError::stream(&name, e))?;
                    let record = ledger.get_or_create(id);
                    record.attach_meta(payload);
                    record.set_folder(is_folder);
                }
                EntryRole::Content(id) => {
                    observer.tick(&format!("[{}] Reading (--+) {}...", ledger.len(), id));
                    let payload =
                        capture(&mut entry).map_err(|e| PackageError::stream(&name, e))?;
                    ledger.get_or_create(id).attach_asset(payload);
                }
                EntryRole::Ignorable => {
                    if name.trim_start_matches("./") == COVER_ENTRY {
                        stats.has_cover = true;
                    }
                    stats.ignored += 1;
                    observer.tick("Skipping known extra...");
                }
                EntryRole::Unrecognized(name) => {
                    observer.warning(&format!("!!! Entry not recognized: {}", name));
                    observer.tick("Skipping unrecognized entry...");
                    stats.unrecognized.push(name);
                }
            }
        }

        debug!(
            "Collected {} assets from {} entries",
            ledger.len(),
            stats.entries
        );
        Ok(Collected { ledger, stats })
    }

    fn open(path: &Path) -> PackageResult<Archive<PackageStream>> {
        if !path.is_file() {
            return Err(PackageError::PackageNotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Ok(Archive::new(GzDecoder::new(BufReader::new(file))))
    }
}

fn read_text<R: Read>(reader: &mut R, name: &str) -> PackageResult<String> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| PackageError::stream(name, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// First line of a `pathname` entry; the sentinel line after it is ignored
fn first_line(text: &str) -> &str {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let line = text.split('\n').next().unwrap_or_default();
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::CollectingObserver;
    use crate::test_support::{write_package, TestEntry};
    use tempfile::tempdir;
    use unitypack_core::{Part, Readiness};

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("Assets/Foo.txt\n00"), "Assets/Foo.txt");
        assert_eq!(first_line("Assets/Foo.txt\r\n00\r\n"), "Assets/Foo.txt");
        assert_eq!(first_line("Assets/Foo.txt"), "Assets/Foo.txt");
        assert_eq!(first_line("\u{feff}Assets/Bom.txt\n"), "Assets/Bom.txt");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn test_count_entries_includes_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.unitypackage");
        write_package(
            &path,
            &[
                TestEntry::dir("aaaa/"),
                TestEntry::file("aaaa/pathname", b"Assets/A.txt\n00"),
                TestEntry::file("aaaa/asset", b"A"),
            ],
        );
        assert_eq!(PackageReader::count_entries(&path).unwrap(), 3);
    }

    #[test]
    fn test_collect_out_of_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.unitypackage");
        write_package(
            &path,
            &[
                TestEntry::file("BBBB/asset", b"content"),
                TestEntry::file("BBBB/asset.meta", b"meta"),
                TestEntry::file("BBBB/pathname", b"Assets/B.bin\n00"),
                TestEntry::file("cccc/asset.meta", b"folder meta"),
                TestEntry::file("cccc/pathname", b"Assets/Folder\n00"),
            ],
        );

        let mut spool = Spool::new(None).unwrap();
        let mut observer = CollectingObserver::default();
        let collected = PackageReader::collect(&path, &mut spool, &mut observer).unwrap();

        assert_eq!(collected.ledger.len(), 2);
        assert_eq!(collected.stats.entries, 5);
        assert!(observer.warnings.is_empty());

        let b = collected.ledger.get("bbbb").unwrap();
        assert_eq!(b.readiness(), Readiness::Ready);
        assert_eq!(b.logical_path(), Some("Assets/B.bin"));
        assert_eq!(b.asset().unwrap().len(), 7);

        let c = collected.ledger.get("cccc").unwrap();
        assert_eq!(c.readiness(), Readiness::MetaOnly);
    }

    #[test]
    fn test_collect_marks_folders_from_meta() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.unitypackage");
        write_package(
            &path,
            &[
                TestEntry::file("aaaa/pathname", b"Assets/Bar\n00"),
                TestEntry::file("aaaa/asset.meta", b"guid: aaaa\nfolderAsset: yes\n"),
                TestEntry::file("bbbb/pathname", b"Assets/Gone.png\n00"),
                TestEntry::file("bbbb/asset.meta", b"guid: bbbb\nTextureImporter: {}\n"),
            ],
        );

        let mut spool = Spool::new(None).unwrap();
        let collected =
            PackageReader::collect(&path, &mut spool, &mut CollectingObserver::default()).unwrap();

        let bar = collected.ledger.get("aaaa").unwrap();
        assert!(bar.is_folder());
        assert_eq!(bar.meta().unwrap().len(), 28);

        let gone = collected.ledger.get("bbbb").unwrap();
        assert_eq!(gone.readiness(), Readiness::MetaOnly);
        assert!(!gone.is_folder());
    }

    #[test]
    fn test_collect_reports_unrecognized_and_ignorable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.unitypackage");
        write_package(
            &path,
            &[
                TestEntry::file(".cover.png", b"\x89PNG"),
                TestEntry::file("aaaa/preview.png", b"png"),
                TestEntry::file("aaaa/notes.txt", b"?"),
            ],
        );

        let mut observer = CollectingObserver::default();
        let listing = PackageReader::list(&path, &mut observer).unwrap();

        assert!(listing.assets.is_empty());
        assert!(listing.stats.has_cover);
        assert_eq!(listing.stats.ignored, 2);
        assert_eq!(listing.stats.unrecognized, vec!["aaaa/notes.txt".to_string()]);
        assert_eq!(observer.warnings.len(), 1);
        assert!(observer.warnings[0].contains("aaaa/notes.txt"));
    }

    #[test]
    fn test_unsafe_path_is_not_recorded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.unitypackage");
        write_package(
            &path,
            &[
                TestEntry::file("aaaa/pathname", b"../../etc/evil\n00"),
                TestEntry::file("aaaa/asset", b"x"),
            ],
        );

        let mut observer = CollectingObserver::default();
        let listing = PackageReader::list(&path, &mut observer).unwrap();

        assert_eq!(listing.stats.rejected_paths, vec!["../../etc/evil".to_string()]);
        assert_eq!(
            listing.assets[0].readiness,
            Readiness::Incomplete {
                missing: vec![Part::Path, Part::Meta]
            }
        );
    }

    #[test]
    fn test_missing_package() {
        let dir = tempdir().unwrap();
        let err = PackageReader::count_entries(&dir.path().join("nope")).unwrap_err();
        assert!(err.is_fatal_setup());
    }

    #[test]
    fn test_corrupted_package() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.unitypackage");
        std::fs::write(&path, b"not a valid archive").unwrap();

        let err = PackageReader::count_entries(&path).unwrap_err();
        assert!(err.is_streaming());
    }
}
