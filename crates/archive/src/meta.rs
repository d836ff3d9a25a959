//! Meta document reader
//!
//! Meta sidecars are YAML mappings. Only two keys matter here: `guid`, the
//! asset identifier, and `folderAsset`, whose presence marks a folder. The rest
//! of the document is carried verbatim and never validated.

use crate::error::{PackageError, PackageResult};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::path::Path;
use unitypack_core::AssetId;

/// Identifier key
pub const GUID_KEY: &str = "guid";

/// Folder marker key
pub const FOLDER_KEY: &str = "folderAsset";

/// The fields read from a meta document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaDocument {
    /// Asset identifier
    pub guid: AssetId,
    /// Whether the folder marker is present
    pub folder_asset: bool,
}

impl MetaDocument {
    /// Read and parse a meta file
    pub fn from_path(path: &Path) -> PackageResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text).map_err(|reason| PackageError::invalid_meta(path, reason))
    }

    /// Parse the first YAML document in `text`
    pub fn parse(text: &str) -> Result<Self, String> {
        let mapping = first_mapping(text)?;

        let guid = match mapping.get(GUID_KEY) {
            Some(Value::String(s)) => AssetId::parse(s),
            // All-digit GUIDs load as numbers; take the raw text instead
            Some(Value::Number(_)) => raw_scalar(text, GUID_KEY).and_then(AssetId::parse),
            Some(_) => None,
            None => return Err(format!("missing `{}` key", GUID_KEY)),
        }
        .ok_or_else(|| format!("`{}` is not a usable identifier", GUID_KEY))?;

        Ok(MetaDocument {
            guid,
            folder_asset: mapping.contains_key(FOLDER_KEY),
        })
    }

    /// Whether raw meta bytes carry the folder marker
    ///
    /// Unlike [`MetaDocument::parse`] no `guid` is required; anything that is
    /// not a YAML mapping counts as a plain file asset.
    pub fn declares_folder(bytes: &[u8]) -> bool {
        std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| first_mapping(text).ok())
            .map(|mapping| mapping.contains_key(FOLDER_KEY))
            .unwrap_or(false)
    }
}

fn first_mapping(text: &str) -> Result<Mapping, String> {
    let first = serde_yaml::Deserializer::from_str(text)
        .next()
        .ok_or_else(|| "empty document".to_string())?;
    match Value::deserialize(first).map_err(|e| e.to_string())? {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err("root is not a mapping".to_string()),
    }
}

/// Raw text of a top-level `key: value` line
fn raw_scalar<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    text.lines().find_map(|line| {
        let rest = line.strip_prefix(key)?.trim_start().strip_prefix(':')?;
        let value = rest.trim().trim_matches(|c| c == '"' || c == '\'');
        Some(value)
    })
}
