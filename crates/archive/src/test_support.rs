//! Fixtures shared by this crate's unit tests

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::path::Path;
use tar::{Builder, EntryType, Header};

pub(crate) struct TestEntry {
    name: &'static str,
    data: &'static [u8],
    dir: bool,
}

impl TestEntry {
    pub(crate) fn file(name: &'static str, data: &'static [u8]) -> Self {
        TestEntry {
            name,
            data,
            dir: false,
        }
    }

    pub(crate) fn dir(name: &'static str) -> Self {
        TestEntry {
            name,
            data: b"",
            dir: true,
        }
    }
}

/// Write a gzip tar package with entries in the given order
pub(crate) fn write_package(path: &Path, entries: &[TestEntry]) {
    let file = File::create(path).unwrap();
    let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));
    for entry in entries {
        let mut header = Header::new_gnu();
        if entry.dir {
            header.set_entry_type(EntryType::Directory);
            header.set_mode(0o755);
        } else {
            header.set_entry_type(EntryType::Regular);
            header.set_mode(0o644);
        }
        header.set_size(entry.data.len() as u64);
        builder
            .append_data(&mut header, entry.name, entry.data)
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}
