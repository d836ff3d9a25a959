//! Asset record model
//!
//! An [`AssetRecord`] accumulates everything known about one asset while a run
//! discovers its pieces. Pieces arrive in any order, so the record tracks three
//! independent flags (path, meta, asset) and derives its [`Readiness`] from
//! them.
//!
//! Records are generic over the payload handle type `P`. The extract
//! direction stores spooled archive content, the build direction stores the
//! physical source files. In both cases a payload is taken out of the record
//! exactly once, by consuming the record with [`AssetRecord::into_parts`].

use crate::types::AssetId;
use serde::Serialize;
use std::fmt;

/// One of the three pieces that make up an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Part {
    /// The logical path (`pathname` entry)
    Path,
    /// The meta document (`asset.meta` entry)
    Meta,
    /// The content bytes (`asset` entry)
    Asset,
}

impl Part {
    /// Lowercase name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Part::Path => "path",
            Part::Meta => "meta",
            Part::Asset => "asset",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readiness of a record, derived purely from its three flags
///
/// The four states are mutually exclusive and exhaustive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Readiness {
    /// Path, meta and content are all present
    Ready,
    /// Path and meta present, no content (typical for folders)
    MetaOnly,
    /// Path and content present, no meta
    AssetOnly,
    /// Anything else; lists the missing parts in path, meta, asset order
    Incomplete {
        /// Parts that were never seen
        missing: Vec<Part>,
    },
}

impl Readiness {
    /// Derive readiness from the three flags
    pub fn from_flags(path_set: bool, meta_set: bool, asset_set: bool) -> Self {
        match (path_set, meta_set, asset_set) {
            (true, true, true) => Readiness::Ready,
            (true, true, false) => Readiness::MetaOnly,
            (true, false, true) => Readiness::AssetOnly,
            _ => {
                let mut missing = Vec::with_capacity(3);
                if !path_set {
                    missing.push(Part::Path);
                }
                if !meta_set {
                    missing.push(Part::Meta);
                }
                if !asset_set {
                    missing.push(Part::Asset);
                }
                Readiness::Incomplete { missing }
            }
        }
    }

    /// Short label for tables and logs
    pub fn label(&self) -> &'static str {
        match self {
            Readiness::Ready => "ready",
            Readiness::MetaOnly => "meta-only",
            Readiness::AssetOnly => "asset-only",
            Readiness::Incomplete { .. } => "incomplete",
        }
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readiness::Incomplete { missing } => {
                let names: Vec<&str> = missing.iter().map(Part::as_str).collect();
                write!(f, "incomplete (missing: {})", names.join(", "))
            }
            other => f.write_str(other.label()),
        }
    }
}

/// Accumulated state for one asset identifier
#[derive(Debug)]
pub struct AssetRecord<P> {
    id: AssetId,
    logical_path: String,
    is_folder: bool,
    meta: Option<P>,
    asset: Option<P>,
    path_set: bool,
    meta_set: bool,
    asset_set: bool,
}

impl<P> AssetRecord<P> {
    /// Create an empty record with no flags set
    pub fn new(id: AssetId) -> Self {
        AssetRecord {
            id,
            logical_path: String::new(),
            is_folder: false,
            meta: None,
            asset: None,
            path_set: false,
            meta_set: false,
            asset_set: false,
        }
    }

    /// The record's identifier
    pub fn id(&self) -> &AssetId {
        &self.id
    }

    /// The logical path, if one has been recorded
    pub fn logical_path(&self) -> Option<&str> {
        if self.path_set {
            Some(&self.logical_path)
        } else {
            None
        }
    }

    /// Record the logical path. Last write wins.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.logical_path = path.into();
        self.path_set = true;
    }

    /// Attach the meta payload, replacing any earlier one
    pub fn attach_meta(&mut self, payload: P) {
        self.meta = Some(payload);
        self.meta_set = true;
    }

    /// Attach the content payload, replacing any earlier one
    pub fn attach_asset(&mut self, payload: P) {
        self.asset = Some(payload);
        self.asset_set = true;
    }

    /// Mark the record as folder-typed (build direction)
    pub fn set_folder(&mut self, is_folder: bool) {
        self.is_folder = is_folder;
    }

    /// Whether the record is folder-typed
    pub fn is_folder(&self) -> bool {
        self.is_folder
    }

    /// Whether a logical path has been recorded
    pub fn path_set(&self) -> bool {
        self.path_set
    }

    /// Whether a meta payload has been attached
    pub fn meta_set(&self) -> bool {
        self.meta_set
    }

    /// Whether a content payload has been attached
    pub fn asset_set(&self) -> bool {
        self.asset_set
    }

    /// Current readiness
    pub fn readiness(&self) -> Readiness {
        Readiness::from_flags(self.path_set, self.meta_set, self.asset_set)
    }

    /// Borrow the meta payload
    pub fn meta(&self) -> Option<&P> {
        self.meta.as_ref()
    }

    /// Borrow the content payload
    pub fn asset(&self) -> Option<&P> {
        self.asset.as_ref()
    }

    /// Summarize the record without touching its payloads
    pub fn summary(&self) -> AssetSummary {
        AssetSummary {
            id: self.id.clone(),
            path: self.logical_path().map(str::to_string),
            readiness: self.readiness(),
        }
    }

    /// Consume the record, handing out its payloads
    pub fn into_parts(self) -> RecordParts<P> {
        let readiness = self.readiness();
        RecordParts {
            logical_path: if self.path_set {
                Some(self.logical_path)
            } else {
                None
            },
            id: self.id,
            is_folder: self.is_folder,
            meta: self.meta,
            asset: self.asset,
            readiness,
        }
    }
}

/// A consumed record
#[derive(Debug)]
pub struct RecordParts<P> {
    /// Identifier
    pub id: AssetId,
    /// Logical path, if it was set
    pub logical_path: Option<String>,
    /// Folder marker
    pub is_folder: bool,
    /// Meta payload
    pub meta: Option<P>,
    /// Content payload
    pub asset: Option<P>,
    /// Readiness at the time the record was consumed
    pub readiness: Readiness,
}

/// Payload-free view of a record, used for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetSummary {
    /// Identifier
    pub id: AssetId,
    /// Logical path, if known
    pub path: Option<String>,
    /// Readiness
    pub readiness: Readiness,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_record_is_incomplete() {
        let record: AssetRecord<()> = AssetRecord::new(AssetId::new("aaaa"));
        assert_eq!(
            record.readiness(),
            Readiness::Incomplete {
                missing: vec![Part::Path, Part::Meta, Part::Asset]
            }
        );
        assert!(record.logical_path().is_none());
    }

    #[test]
    fn test_flags_accumulate() {
        let mut record = AssetRecord::new(AssetId::new("aaaa"));
        record.attach_meta("meta");
        assert_eq!(
            record.readiness(),
            Readiness::Incomplete {
                missing: vec![Part::Path, Part::Asset]
            }
        );

        record.set_path("Assets/Foo.txt");
        assert_eq!(record.readiness(), Readiness::MetaOnly);

        record.attach_asset("asset");
        assert_eq!(record.readiness(), Readiness::Ready);

        // Re-setting never clears a flag
        record.set_path("Assets/Bar.txt");
        record.attach_meta("meta2");
        assert_eq!(record.readiness(), Readiness::Ready);
        assert_eq!(record.logical_path(), Some("Assets/Bar.txt"));
        assert_eq!(record.meta(), Some(&"meta2"));
    }

    #[test]
    fn test_asset_only() {
        let mut record = AssetRecord::new(AssetId::new("aaaa"));
        record.set_path("Assets/Foo.txt");
        record.attach_asset(1u8);
        assert_eq!(record.readiness(), Readiness::AssetOnly);
        assert_eq!(record.readiness().label(), "asset-only");
    }

    #[test]
    fn test_into_parts_hands_out_payloads() {
        let mut record = AssetRecord::new(AssetId::new("AAAA"));
        record.set_path("Assets/Foo.txt");
        record.attach_meta(String::from("M"));
        record.attach_asset(String::from("C"));

        let parts = record.into_parts();
        assert_eq!(parts.id.as_str(), "aaaa");
        assert_eq!(parts.logical_path.as_deref(), Some("Assets/Foo.txt"));
        assert_eq!(parts.meta.as_deref(), Some("M"));
        assert_eq!(parts.asset.as_deref(), Some("C"));
        assert_eq!(parts.readiness, Readiness::Ready);
    }

    #[test]
    fn test_incomplete_display_lists_missing() {
        let readiness = Readiness::from_flags(false, true, false);
        assert_eq!(readiness.to_string(), "incomplete (missing: path, asset)");
    }

    #[test]
    fn test_summary_serializes_state() {
        let mut record: AssetRecord<()> = AssetRecord::new(AssetId::new("aaaa"));
        record.set_path("Assets/A");
        let summary = record.summary();
        assert_eq!(summary.path.as_deref(), Some("Assets/A"));
        assert!(matches!(summary.readiness, Readiness::Incomplete { .. }));
    }

    proptest! {
        #[test]
        fn prop_readiness_is_pure_and_exhaustive(path in any::<bool>(), meta in any::<bool>(), asset in any::<bool>()) {
            let readiness = Readiness::from_flags(path, meta, asset);

            // Same inputs, same answer
            prop_assert_eq!(&readiness, &Readiness::from_flags(path, meta, asset));

            let is_ready = matches!(readiness, Readiness::Ready);
            let is_meta_only = matches!(readiness, Readiness::MetaOnly);
            let is_asset_only = matches!(readiness, Readiness::AssetOnly);
            let is_incomplete = matches!(readiness, Readiness::Incomplete { .. });

            // Exactly one state holds
            let count = [is_ready, is_meta_only, is_asset_only, is_incomplete]
                .iter()
                .filter(|b| **b)
                .count();
            prop_assert_eq!(count, 1);

            prop_assert_eq!(is_ready, path && meta && asset);
            prop_assert_eq!(is_meta_only, path && meta && !asset);
            prop_assert_eq!(is_asset_only, path && asset && !meta);

            if let Readiness::Incomplete { missing } = readiness {
                prop_assert_eq!(missing.contains(&Part::Path), !path);
                prop_assert_eq!(missing.contains(&Part::Meta), !meta);
                prop_assert_eq!(missing.contains(&Part::Asset), !asset);
            }
        }
    }
}
