//! Package container I/O for unitypack
//!
//! A package is a gzip-compressed tar archive:
//!
//! ```text
//! package.unitypackage
//! ├── .cover.png            # optional preview image
//! └── <guid>/
//!     ├── pathname          # logical path, then a "00" line
//!     ├── asset.meta        # YAML meta document
//!     └── asset             # content (absent for folders)
//! ```
//!
//! # Extraction
//!
//! ```text
//! count pass ──► collect pass ──► directory plan ──► materializer
//!  (optional)     (spooling)       (create dirs)     (write files)
//! ```
//!
//! # Build
//!
//! ```text
//! tree scan ──► ledger ──► writer (temp file) ──► rename to .unitypackage
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assembler;
pub mod error;
pub mod materializer;
pub mod meta;
pub mod observer;
pub mod options;
pub mod payload;
pub mod reader;
pub mod run;
pub mod writer;

#[cfg(test)]
mod test_support;

pub use assembler::PackageAssembler;
pub use error::{PackageError, PackageResult};
pub use materializer::{ExtractReport, IncompleteAsset, Materializer};
pub use meta::MetaDocument;
pub use observer::{CollectingObserver, NullObserver, Observer, TracingObserver};
pub use options::{canonical_package_path, BuildOptions, ExtractOptions, PACKAGE_EXTENSION};
pub use payload::{SourceFile, Spool, SpooledPayload};
pub use reader::{CollectStats, Collected, PackageListing, PackageReader};
pub use run::{build_package, extract_package, list_package};
pub use writer::{is_png, BuildReport, PackageWriter};
