//! Run entry points
//!
//! One function per operation. Each validates its inputs before touching the
//! filesystem, then drives the reader/materializer or assembler/writer
//! pipeline and reports progress through the supplied observer.

use crate::assembler::PackageAssembler;
use crate::error::{PackageError, PackageResult};
use crate::materializer::{ExtractReport, Materializer};
use crate::observer::Observer;
use crate::options::{BuildOptions, ExtractOptions};
use crate::payload::Spool;
use crate::reader::{PackageListing, PackageReader};
use crate::writer::{BuildReport, PackageWriter};
use std::path::Path;
use tracing::info;
use unitypack_core::DirectoryPlan;

/// Extract `package` into the directory `output`
///
/// Incomplete records and unrecognized entries are reported, not fatal.
pub fn extract_package(
    package: &Path,
    output: &Path,
    options: &ExtractOptions,
    observer: &mut dyn Observer,
) -> PackageResult<ExtractReport> {
    if !package.is_file() {
        return Err(PackageError::PackageNotFound(package.to_path_buf()));
    }
    if !output.is_dir() {
        return Err(PackageError::OutputDirNotFound(output.to_path_buf()));
    }
    let root = output.canonicalize()?;
    info!("Extracting {} into {}", package.display(), root.display());

    let mut report = ExtractReport {
        output: root.clone(),
        ..Default::default()
    };

    observer.stage("Listing package...");
    if options.count_entries {
        let total = PackageReader::count_entries(package)?;
        report.entries_total = Some(total);
        observer.total(total);
    }

    observer.stage("Collecting assets...");
    let mut spool = Spool::new(options.scratch_dir.as_deref())?;
    let collected = PackageReader::collect(package, &mut spool, observer)?;
    report.entries_seen = collected.stats.entries;
    report.assets = collected.ledger.len();
    report.unrecognized = collected.stats.unrecognized;
    report.rejected_paths = collected.stats.rejected_paths;
    report.has_cover = collected.stats.has_cover;

    observer.stage("Creating structure...");
    let plan = DirectoryPlan::from_ledger(&collected.ledger);
    report.directories_created = plan.create_all(&root)?;

    observer.stage("Extracting files...");
    Materializer::new(&root).run(collected.ledger, &mut report, observer)?;

    observer.stage("Done!");
    info!("{}", report.summary());
    Ok(report)
}

/// Build a package from the tree at `folder`, written to the canonical form
/// of `output`
pub fn build_package(
    folder: &Path,
    output: &Path,
    cover: Option<&Path>,
    options: &BuildOptions,
    observer: &mut dyn Observer,
) -> PackageResult<BuildReport> {
    if !folder.is_dir() {
        return Err(PackageError::SourceDirNotFound(folder.to_path_buf()));
    }
    info!("Building {} from {}", output.display(), folder.display());

    observer.stage("Scanning source tree...");
    let ledger = PackageAssembler::new(folder, options).scan(observer)?;

    observer.stage("Collecting assets...");
    observer.total(ledger.len());

    observer.stage("Building package...");
    let report = PackageWriter::new(options).write(ledger, output, cover, observer)?;

    observer.stage("Done!");
    info!("{}", report.summary());
    Ok(report)
}

/// List the assets in `package` without extracting anything
pub fn list_package(package: &Path, observer: &mut dyn Observer) -> PackageResult<PackageListing> {
    observer.stage("Listing package...");
    let listing = PackageReader::list(package, observer)?;
    observer.stage("Done!");
    Ok(listing)
}
