//! Run options and format constants

use std::path::{Path, PathBuf};

/// Canonical package file extension
pub const PACKAGE_EXTENSION: &str = "unitypackage";

/// Top-level segment logical paths are rooted under
pub const DEFAULT_ROOT_SEGMENT: &str = "Assets";

/// Second line written to every `pathname` entry
///
/// Kept for compatibility with existing packages; never interpreted on read.
pub const PATHNAME_SENTINEL: &str = "00";

/// Suffix of meta sidecar files on disk
pub const META_FILE_SUFFIX: &str = ".meta";

/// Extraction options
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Run a separate counting pass so observers get an entry total
    pub count_entries: bool,
    /// Parent directory for the run's scratch area (system temp if unset)
    pub scratch_dir: Option<PathBuf>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            count_entries: true,
            scratch_dir: None,
        }
    }
}

impl ExtractOptions {
    /// Single-pass extraction, no progress total
    pub fn single_pass() -> Self {
        ExtractOptions {
            count_entries: false,
            ..Default::default()
        }
    }

    /// Set whether the counting pass runs
    pub fn with_count_entries(mut self, count: bool) -> Self {
        self.count_entries = count;
        self
    }

    /// Place the scratch area under `dir`
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }
}

/// Build options
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Segment prepended to every logical path
    pub root_segment: String,
    /// Second line of each `pathname` entry
    pub sentinel: String,
    /// Gzip level, 0-9
    pub compression_level: u32,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            root_segment: DEFAULT_ROOT_SEGMENT.to_string(),
            sentinel: PATHNAME_SENTINEL.to_string(),
            compression_level: 6,
        }
    }
}

impl BuildOptions {
    /// Fastest compression
    pub fn fast() -> Self {
        BuildOptions {
            compression_level: 1,
            ..Default::default()
        }
    }

    /// Smallest output
    pub fn best() -> Self {
        BuildOptions {
            compression_level: 9,
            ..Default::default()
        }
    }

    /// Set the root segment
    pub fn with_root_segment(mut self, segment: impl Into<String>) -> Self {
        self.root_segment = segment.into();
        self
    }

    /// Set the gzip level (clamped to 9)
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(9);
        self
    }

    /// Join the root segment and a tree-relative path
    pub(crate) fn logical_path(&self, relative: &str) -> String {
        let segment = self.root_segment.trim_matches('/');
        if segment.is_empty() {
            relative.to_string()
        } else {
            format!("{}/{}", segment, relative)
        }
    }
}

/// Canonical output location for a build target
///
/// The extension is replaced with `.unitypackage`, so `out/pack` and
/// `out/pack.tar.gz` become `out/pack.unitypackage` and
/// `out/pack.tar.unitypackage`.
pub fn canonical_package_path(output: &Path) -> PathBuf {
    output.with_extension(PACKAGE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let extract = ExtractOptions::default();
        assert!(extract.count_entries);
        assert!(extract.scratch_dir.is_none());
        assert!(!ExtractOptions::single_pass().count_entries);

        let build = BuildOptions::default();
        assert_eq!(build.root_segment, "Assets");
        assert_eq!(build.sentinel, "00");
        assert_eq!(BuildOptions::best().compression_level, 9);
        assert_eq!(BuildOptions::default().with_compression_level(42).compression_level, 9);
    }

    #[test]
    fn test_logical_path_join() {
        let options = BuildOptions::default();
        assert_eq!(options.logical_path("Foo/Bar.txt"), "Assets/Foo/Bar.txt");

        let bare = BuildOptions::default().with_root_segment("");
        assert_eq!(bare.logical_path("Foo.txt"), "Foo.txt");
    }

    #[test]
    fn test_canonical_package_path() {
        assert_eq!(
            canonical_package_path(Path::new("out/pack")),
            PathBuf::from("out/pack.unitypackage")
        );
        assert_eq!(
            canonical_package_path(Path::new("out/pack.unitypackage")),
            PathBuf::from("out/pack.unitypackage")
        );
    }
}
