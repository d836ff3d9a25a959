//! Entry classifier
//!
//! Maps a raw archive entry name to the role it plays for its asset. The
//! owning identifier is the entry's immediate parent segment (the group
//! directory), so `0a1b.../asset.meta` belongs to asset `0a1b...`.
//!
//! ## Precedence
//!
//! Suffixes are checked most specific first: `pathname`, then `asset.meta`,
//! then `asset`. `asset.meta` ends with neither `asset` nor `pathname`, but the
//! meta suffix contains the content suffix, so the ordering is what keeps a
//! meta entry from ever being read as content.

use crate::types::AssetId;

/// Suffix of the entry holding the logical path
pub const PATHNAME_SUFFIX: &str = "pathname";

/// Suffix of the entry holding the meta document
pub const META_SUFFIX: &str = "asset.meta";

/// Suffix of the entry holding the content bytes
pub const ASSET_SUFFIX: &str = "asset";

/// Reserved top-level cover image entry
pub const COVER_ENTRY: &str = ".cover.png";

/// Suffixes of known extras that are skipped without a warning
pub const IGNORABLE_SUFFIXES: &[&str] = &["preview.png", ".icon.png"];

/// Type tag of an archive entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file (or anything else carrying bytes)
    Regular,
    /// Directory entry
    Directory,
}

/// Role of one archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryRole {
    /// `<id>/pathname`
    Pathname(AssetId),
    /// `<id>/asset.meta`
    Meta(AssetId),
    /// `<id>/asset`
    Content(AssetId),
    /// Known benign extra (previews, icons, the cover)
    Ignorable,
    /// Anything else
    Unrecognized(String),
}

/// Classify an entry by name and type tag
///
/// Total over all inputs: every call yields exactly one role. Directory
/// entries carry no bytes and are reported as [`EntryRole::Ignorable`];
/// callers normally skip them before classifying.
pub fn classify(name: &str, kind: EntryKind) -> EntryRole {
    if kind == EntryKind::Directory {
        return EntryRole::Ignorable;
    }

    let trimmed = name.trim_start_matches("./").trim_end_matches('/');

    if trimmed == COVER_ENTRY || IGNORABLE_SUFFIXES.iter().any(|s| trimmed.ends_with(s)) {
        return EntryRole::Ignorable;
    }

    let make: fn(AssetId) -> EntryRole = if trimmed.ends_with(PATHNAME_SUFFIX) {
        EntryRole::Pathname
    } else if trimmed.ends_with(META_SUFFIX) {
        EntryRole::Meta
    } else if trimmed.ends_with(ASSET_SUFFIX) {
        EntryRole::Content
    } else {
        return EntryRole::Unrecognized(name.to_string());
    };

    match group_directory(trimmed).and_then(AssetId::parse) {
        Some(id) => make(id),
        None => EntryRole::Unrecognized(name.to_string()),
    }
}

/// Immediate parent segment of an entry name
fn group_directory(name: &str) -> Option<&str> {
    let mut segments = name.rsplit('/').filter(|s| !s.is_empty() && *s != ".");
    segments.next()?;
    segments.next()
}
