//! Package entry point for unitypack.
//!
//! [`Package`] names a package file on disk and exposes the three operations
//! on it: extract, list and build.

use crate::error::Result;
use std::path::{Path, PathBuf};
use unitypack_archive::{
    build_package, canonical_package_path, extract_package, list_package, BuildOptions,
    BuildReport, ExtractOptions, ExtractReport, Observer, PackageListing, TracingObserver,
};

/// A package file.
///
/// # Example
///
/// ```ignore
/// use unitypack::prelude::*;
///
/// let report = Package::build("./MyAssets", "./out/my-assets")?;
/// let package = Package::new(&report.output);
/// for asset in package.list()?.assets {
///     println!("{} {:?}", asset.id, asset.path);
/// }
/// package.extract("./restored")?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    path: PathBuf,
}

impl Package {
    /// Refer to the package at `path`.
    ///
    /// Nothing is opened until an operation runs.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Package { path: path.into() }
    }

    /// Location of the package file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extract into `output` with default options.
    ///
    /// Progress goes to `tracing`.
    pub fn extract(&self, output: impl AsRef<Path>) -> Result<ExtractReport> {
        self.extract_with(
            output,
            &ExtractOptions::default(),
            &mut TracingObserver::new(),
        )
    }

    /// Extract into `output` with explicit options and observer.
    pub fn extract_with(
        &self,
        output: impl AsRef<Path>,
        options: &ExtractOptions,
        observer: &mut dyn Observer,
    ) -> Result<ExtractReport> {
        Ok(extract_package(
            &self.path,
            output.as_ref(),
            options,
            observer,
        )?)
    }

    /// List the assets in the package.
    pub fn list(&self) -> Result<PackageListing> {
        Ok(list_package(&self.path, &mut TracingObserver::new())?)
    }

    /// Build a package from `folder` with default options and no cover.
    ///
    /// The package is written to `output` with its extension replaced by
    /// `.unitypackage`.
    pub fn build(folder: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<BuildReport> {
        Self::build_with(
            folder,
            output,
            None,
            &BuildOptions::default(),
            &mut TracingObserver::new(),
        )
    }

    /// Build a package with an optional cover, explicit options and observer.
    pub fn build_with(
        folder: impl AsRef<Path>,
        output: impl AsRef<Path>,
        cover: Option<&Path>,
        options: &BuildOptions,
        observer: &mut dyn Observer,
    ) -> Result<BuildReport> {
        Ok(build_package(
            folder.as_ref(),
            output.as_ref(),
            cover,
            options,
            observer,
        )?)
    }

    /// The package a build targeting `output` produces.
    pub fn for_build_target(output: impl AsRef<Path>) -> Self {
        Package::new(canonical_package_path(output.as_ref()))
    }
}
