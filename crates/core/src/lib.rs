//! Asset correlation core for unitypack
//!
//! A package stores every asset as a group of up to three entries named by the
//! asset's identifier. This crate holds the pieces that correlate those
//! entries, independent of any I/O stream:
//!
//! - [`classifier`]: maps an entry name to its role and owning identifier
//! - [`record`]: the per-asset record and its readiness states
//! - [`ledger`]: the run-scoped identifier → record map
//! - [`planner`]: the set of directories an extraction needs

#![warn(missing_docs)]

pub mod classifier;
pub mod error;
pub mod ledger;
pub mod planner;
pub mod record;
pub mod types;

pub use classifier::{classify, EntryKind, EntryRole};
pub use error::{CoreError, CoreResult};
pub use ledger::Ledger;
pub use planner::{is_safe_logical_path, logical_to_relative, DirectoryPlan};
pub use record::{AssetRecord, AssetSummary, Part, Readiness, RecordParts};
pub use types::AssetId;
