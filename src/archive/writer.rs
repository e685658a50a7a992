//! Canonical ZIP writer
//!
//! Every entry header carries the same timestamp and a permission mode chosen
//! by [`PermissionPolicy`], and entries are written sorted by name. The output
//! is therefore a function of entry names and bytes alone.

use crate::error::ArchiveError;
use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use tracing::trace;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Deflate level pinned so output does not track backend defaults.
const COMPRESSION_LEVEL: i32 = 6;

/// Mode for regular entries.
pub const FILE_MODE: u32 = 0o644;
/// Mode for entries flagged executable under [`PermissionPolicy::PreserveExecutable`].
pub const EXECUTABLE_MODE: u32 = 0o755;

/// How entry permission bits are chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PermissionPolicy {
    /// Every entry is written as 0644
    #[default]
    Fixed,
    /// Entries flagged executable are written as 0755, the rest as 0644
    PreserveExecutable,
}

impl PermissionPolicy {
    pub fn mode_for(self, executable: bool) -> u32 {
        match self {
            PermissionPolicy::PreserveExecutable if executable => EXECUTABLE_MODE,
            _ => FILE_MODE,
        }
    }
}

/// One file to be stored in the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub contents: Vec<u8>,
    pub executable: bool,
}

impl ArchiveEntry {
    /// Build an entry, normalizing `name` to its canonical form
    pub fn new(name: &str, contents: Vec<u8>) -> Result<Self, ArchiveError> {
        Ok(Self {
            name: crate::archive::path::normalize_entry_name(name)?,
            contents,
            executable: false,
        })
    }

    pub fn executable(mut self, executable: bool) -> Self {
        self.executable = executable;
        self
    }
}

/// Write `entries` into an in-memory ZIP archive
///
/// Input order is irrelevant; entries are sorted by name first. Two entries
/// with the same name are rejected rather than silently shadowed. Nothing is
/// returned unless the archive was finished successfully.
pub fn write_archive(
    entries: Vec<ArchiveEntry>,
    policy: PermissionPolicy,
) -> Result<Vec<u8>, ArchiveError> {
    let mut sorted = BTreeMap::new();
    for entry in entries {
        if sorted.contains_key(&entry.name) {
            return Err(ArchiveError::DuplicateEntry(entry.name));
        }
        sorted.insert(entry.name.clone(), entry);
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, entry) in sorted {
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(COMPRESSION_LEVEL))
            .last_modified_time(DateTime::default())
            .unix_permissions(policy.mode_for(entry.executable));

        trace!(entry = %name, bytes = entry.contents.len(), "Writing archive entry");
        zip.start_file(name, options)?;
        zip.write_all(&entry.contents)
            .map_err(|e| ArchiveError::Zip(zip::result::ZipError::Io(e)))?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
