//! Archive assembler: package serialization
//!
//! Serializes a scanned ledger into a gzip-compressed tar package:
//!
//! ```text
//! <name>.unitypackage
//! ├── .cover.png            # optional
//! └── <guid>/
//!     ├── pathname          # "<logical path>\n00"
//!     ├── asset.meta        # verbatim meta sidecar
//!     └── asset             # verbatim content, absent for folders
//! ```
//!
//! The package is written to a temporary file next to its destination and
//! renamed to the canonical `.unitypackage` name only once the gzip stream is
//! finished. A failed build leaves nothing at the canonical name.

use crate::error::{PackageError, PackageResult};
use crate::observer::Observer;
use crate::options::{canonical_package_path, BuildOptions, PACKAGE_EXTENSION};
use crate::payload::SourceFile;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tar::{Builder, EntryType, Header, HeaderMode};
use tracing::{debug, info};
use unitypack_core::classifier::{ASSET_SUFFIX, COVER_ENTRY, META_SUFFIX, PATHNAME_SUFFIX};
use unitypack_core::{AssetId, Ledger};

/// Fixed modification time for generated entries (matches tar's deterministic mode)
const GENERATED_MTIME: u64 = 1153704088;

/// Outcome of a build
#[derive(Debug, Default, Clone)]
pub struct BuildReport {
    /// Final package location
    pub output: PathBuf,
    /// Asset groups written
    pub assets: usize,
    /// Of which folder-typed
    pub folders: usize,
    /// Non-folder assets written without content
    pub missing_content: Vec<AssetId>,
    /// Whether a cover entry was written
    pub cover_included: bool,
}

impl BuildReport {
    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} assets ({} folders) written to {}{}",
            self.assets,
            self.folders,
            self.output.display(),
            if self.cover_included { " with cover" } else { "" }
        )
    }
}

/// Serializes ledgers into packages
pub struct PackageWriter<'a> {
    options: &'a BuildOptions,
}

impl<'a> PackageWriter<'a> {
    /// Create a writer
    pub fn new(options: &'a BuildOptions) -> Self {
        PackageWriter { options }
    }

    /// Write `ledger` as a package at the canonical form of `output`
    pub fn write(
        &self,
        ledger: Ledger<SourceFile>,
        output: &Path,
        cover: Option<&Path>,
        observer: &mut dyn Observer,
    ) -> PackageResult<BuildReport> {
        let target = canonical_package_path(output);
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent.is_dir() {
            return Err(PackageError::OutputDirNotFound(parent));
        }

        let stem = target
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "package".to_string());
        let temp = tempfile::Builder::new()
            .prefix(&format!(".{}.", stem))
            .suffix(&format!(".{}.tmp", PACKAGE_EXTENSION))
            .tempfile_in(&parent)?;
        debug!("Writing package to {}", temp.path().display());

        let encoder = GzEncoder::new(
            BufWriter::new(temp.reopen()?),
            Compression::new(self.options.compression_level),
        );
        let mut builder = Builder::new(encoder);
        builder.mode(HeaderMode::Deterministic);
        observer.stage("Streams ready.");

        let mut report = BuildReport::default();
        if let Some(cover) = cover {
            report.cover_included = self.append_cover(&mut builder, cover, observer)?;
        }

        for record in ledger.into_records() {
            let parts = record.into_parts();
            let Some(logical) = parts.logical_path else {
                continue;
            };
            let group = parts.id.as_str();

            let pathname = format!("{}\n{}", logical, self.options.sentinel);
            append_bytes(
                &mut builder,
                &format!("{}/{}", group, PATHNAME_SUFFIX),
                pathname.as_bytes(),
            )?;

            match parts.meta {
                Some(meta) => append_source(&mut builder, &format!("{}/{}", group, META_SUFFIX), meta)?,
                None => observer.warning(&format!("!!! No meta document for {}", logical)),
            }

            if parts.is_folder {
                report.folders += 1;
            } else if let Some(asset) = parts.asset {
                append_source(&mut builder, &format!("{}/{}", group, ASSET_SUFFIX), asset)?;
            } else {
                report.missing_content.push(parts.id.clone());
            }

            report.assets += 1;
            observer.tick(&format!("Added {}...", logical));
        }

        let encoder = builder
            .into_inner()
            .map_err(|e| PackageError::stream("package trailer", e))?;
        let buffered = encoder
            .finish()
            .map_err(|e| PackageError::stream("gzip trailer", e))?;
        let file = buffered
            .into_inner()
            .map_err(|e| PackageError::stream("package flush", e.into_error()))?;
        file.sync_all()?;
        drop(file);

        temp.persist(&target).map_err(|e| PackageError::Io(e.error))?;
        info!("Package written to {}", target.display());

        report.output = target;
        Ok(report)
    }

    /// Append the cover if it exists and really is a PNG
    fn append_cover<W: Write>(
        &self,
        builder: &mut Builder<W>,
        cover: &Path,
        observer: &mut dyn Observer,
    ) -> PackageResult<bool> {
        if !cover.is_file() {
            observer.warning(&format!("!!! Cover {} not found, skipped", cover.display()));
            return Ok(false);
        }
        if !is_png(cover) {
            observer.warning(&format!(
                "!!! Cover {} is not a PNG image, skipped",
                cover.display()
            ));
            return Ok(false);
        }
        append_source(builder, COVER_ENTRY, SourceFile::new(cover))?;
        observer.stage("Cover added.");
        Ok(true)
    }
}

/// Check extension and magic bytes
pub fn is_png(path: &Path) -> bool {
    let has_extension = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);
    if !has_extension || !path.is_file() {
        return false;
    }

    let mut head = Vec::with_capacity(32);
    let read = File::open(path).and_then(|f| f.take(32).read_to_end(&mut head));
    if read.is_err() {
        return false;
    }
    matches!(image::guess_format(&head), Ok(image::ImageFormat::Png))
}

fn append_bytes<W: Write>(builder: &mut Builder<W>, name: &str, data: &[u8]) -> PackageResult<()> {
    let mut header = Header::new_gnu();
    header.set_entry_type(EntryType::Regular);
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(GENERATED_MTIME);
    builder
        .append_data(&mut header, name, data)
        .map_err(|e| PackageError::stream(name, e))
}

fn append_source<W: Write>(
    builder: &mut Builder<W>,
    name: &str,
    source: SourceFile,
) -> PackageResult<()> {
    let (file, metadata) = source.open()?;
    let mut header = Header::new_gnu();
    header.set_metadata_in_mode(&metadata, HeaderMode::Deterministic);
    header.set_entry_type(EntryType::Regular);
    header.set_size(metadata.len());
    builder
        .append_data(&mut header, name, file)
        .map_err(|e| PackageError::stream(name, e))
}
