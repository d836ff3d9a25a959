//! Core identifier types
//!
//! This module defines the identifier used to correlate the pieces of one
//! asset across the archive and filesystem representations:
//! - [`AssetId`]: Case-insensitive asset identifier (usually a hex GUID)

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stable identifier for one asset
///
/// In a package every asset lives in an entry group named by its identifier,
/// and the same value is stored under the `guid` key of the asset's meta
/// document. Identifiers are conventionally 32 lowercase hex digits, but the
/// value is treated as opaque: any non-empty string is accepted.
///
/// Comparison is case-insensitive; the identifier is lowercased on
/// construction so `AssetId` can be used directly as a map key.
///
/// # Examples
///
/// ```
/// use unitypack_core::types::AssetId;
///
/// let a = AssetId::new("0A1B2C3D4E5F60718293A4B5C6D7E8F9");
/// let b = AssetId::new("0a1b2c3d4e5f60718293a4b5c6d7e8f9");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "0a1b2c3d4e5f60718293a4b5c6d7e8f9");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Create an identifier, normalizing it to lowercase
    pub fn new(raw: impl AsRef<str>) -> Self {
        AssetId(raw.as_ref().trim().to_ascii_lowercase())
    }

    /// Create an identifier, rejecting empty input
    pub fn parse(raw: impl AsRef<str>) -> Option<Self> {
        let id = Self::new(raw);
        if id.0.is_empty() {
            None
        } else {
            Some(id)
        }
    }

    /// Get the normalized string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for AssetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetId {
    fn from(raw: &str) -> Self {
        AssetId::new(raw)
    }
}
