//! # unitypack
//!
//! Read, extract and build Unity asset packages.
//!
//! A package is a gzip-compressed tar archive in which every asset is a group
//! of up to three entries named by the asset's GUID: its logical path, its
//! meta document and its content. Entries of one asset may appear anywhere in
//! the archive, so extraction correlates them by GUID before writing anything.
//!
//! ## Quick Start
//!
//! ```ignore
//! use unitypack::prelude::*;
//!
//! // Extract into the current directory
//! let report = Package::new("assets.unitypackage").extract(".")?;
//! for skipped in &report.incomplete {
//!     eprintln!("{}", skipped);
//! }
//!
//! // Build from a tree of files with `.meta` sidecars
//! Package::build("./MyAssets", "./my-assets")?;
//! ```
//!
//! ## Crates
//!
//! - [`correlate`]: entry classification, the asset ledger, readiness and the
//!   directory planner
//! - [`archive`]: the container reader and writer, options and observers

#![warn(missing_docs)]

mod error;
mod package;

pub mod prelude;

pub use unitypack_archive as archive;
pub use unitypack_core as correlate;

// Re-export main entry points
pub use error::{Error, Result};
pub use package::Package;

// Re-export commonly used types
pub use unitypack_archive::{
    BuildOptions, BuildReport, CollectingObserver, ExtractOptions, ExtractReport, IncompleteAsset,
    NullObserver, Observer, PackageListing, TracingObserver,
};
pub use unitypack_core::{AssetId, AssetSummary, Part, Readiness};
