//! Asset ledger
//!
//! The ledger is the run-scoped map from [`AssetId`] to [`AssetRecord`]. It is
//! owned by a single run, never shared across threads, and dropped when the run
//! ends. Records are only ever added or updated; there is no removal.
//!
//! Iteration follows identifier order, which keeps materialization and archive
//! serialization deterministic regardless of discovery order.

use crate::record::{AssetRecord, AssetSummary};
use crate::types::AssetId;
use std::collections::btree_map::{self, BTreeMap};
use tracing::debug;

/// Run-scoped map from identifier to asset record
#[derive(Debug)]
pub struct Ledger<P> {
    records: BTreeMap<AssetId, AssetRecord<P>>,
}

impl<P> Default for Ledger<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Ledger<P> {
    /// Create an empty ledger
    pub fn new() -> Self {
        Ledger {
            records: BTreeMap::new(),
        }
    }

    /// Record the logical path for `id`, creating the record if needed
    ///
    /// Last write wins when called repeatedly for the same identifier.
    pub fn create_or_update(&mut self, id: AssetId, path: impl Into<String>) -> &mut AssetRecord<P> {
        let path = path.into();
        let record = self.get_or_create(id);
        if let Some(previous) = record.logical_path() {
            if previous != path {
                debug!(
                    "Logical path for {} changed: {} -> {}",
                    record.id(),
                    previous,
                    path
                );
            }
        }
        record.set_path(path);
        record
    }

    /// Return the record for `id`, inserting an empty one if absent
    pub fn get_or_create(&mut self, id: AssetId) -> &mut AssetRecord<P> {
        match self.records.entry(id) {
            btree_map::Entry::Occupied(entry) => entry.into_mut(),
            btree_map::Entry::Vacant(entry) => {
                let record = AssetRecord::new(entry.key().clone());
                entry.insert(record)
            }
        }
    }

    /// Look up a record without creating it
    pub fn get(&self, id: &str) -> Option<&AssetRecord<P>> {
        self.records.get(id)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the ledger has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in identifier order
    pub fn iter(&self) -> impl Iterator<Item = &AssetRecord<P>> {
        self.records.values()
    }

    /// Payload-free summaries in identifier order
    pub fn summaries(&self) -> Vec<AssetSummary> {
        self.records.values().map(AssetRecord::summary).collect()
    }

    /// Consume the ledger, yielding records in identifier order
    pub fn into_records(self) -> impl Iterator<Item = AssetRecord<P>> {
        self.records.into_values()
    }
}
