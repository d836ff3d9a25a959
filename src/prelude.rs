//! Convenient imports for unitypack.
//!
//! ```ignore
//! use unitypack::prelude::*;
//!
//! Package::new("assets.unitypackage").extract(".")?;
//! ```

// Main entry point
pub use crate::package::Package;

// Error handling
pub use crate::error::{Error, Result};

// Options and reports
pub use unitypack_archive::{BuildOptions, BuildReport, ExtractOptions, ExtractReport};

// Observers
pub use unitypack_archive::{NullObserver, Observer, TracingObserver};

// Correlation types
pub use unitypack_core::{AssetId, AssetSummary, Readiness};
