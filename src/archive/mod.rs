//! Deterministic archiving of a source directory
//!
//! The archive is a pure function of the selected files' relative paths and
//! bytes. Host iteration order, modification times, owners and path
//! separators never reach the output.

pub mod filter;
pub mod path;
pub mod walker;
pub mod writer;

use crate::error::ArchiveError;
use crate::types::ArchiveBytes;
use filter::FileFilter;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};
use walker::{SourceFile, Walker, WalkerConfig};
use writer::{ArchiveEntry, PermissionPolicy};

/// Options controlling which files are archived and how
#[derive(Debug, Clone, Default)]
pub struct ArchiveOptions {
    pub filter: FileFilter,
    pub follow_symlinks: bool,
    pub permissions: PermissionPolicy,
}

/// Builds archives from source directories
#[derive(Debug, Clone, Default)]
pub struct Archiver {
    options: ArchiveOptions,
}

impl Archiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ArchiveOptions) -> Self {
        Self { options }
    }

    /// Archive every selected file under `source`
    ///
    /// Fails with `DirectoryNotFound` when `source` is missing or not a
    /// directory and `FileReadError` when a listed file cannot be read. An
    /// empty directory yields a valid archive with zero entries.
    #[instrument(skip(self), fields(source = %source.display()))]
    pub fn archive(&self, source: &Path) -> Result<ArchiveBytes, ArchiveError> {
        let start = Instant::now();
        info!("lambda: base directory: {}", source.display());

        let walker = Walker::with_config(
            source.to_path_buf(),
            WalkerConfig {
                follow_symlinks: self.options.follow_symlinks,
                filter: self.options.filter.clone(),
            },
        );
        let files = walker.walk()?;
        let source_bytes: u64 = files.iter().map(|f| f.size).sum();
        info!(file_count = files.len(), source_bytes, "lambda: adding files");

        let mut entries = Vec::with_capacity(files.len());
        for file in &files {
            debug!("lambda: + {}", file.entry_name);
            entries.push(self.read_entry(file)?);
        }

        let entry_count = entries.len();
        let bytes = writer::write_archive(entries, self.options.permissions)?;

        info!(
            entry_count,
            archive_bytes = bytes.len(),
            duration_ms = start.elapsed().as_millis(),
            "Archive build completed"
        );
        Ok(ArchiveBytes::new(bytes, entry_count))
    }

    fn read_entry(&self, file: &SourceFile) -> Result<ArchiveEntry, ArchiveError> {
        let contents = std::fs::read(&file.path).map_err(|source| ArchiveError::FileReadError {
            path: file.path.clone(),
            source,
        })?;

        let executable = match self.options.permissions {
            PermissionPolicy::Fixed => false,
            PermissionPolicy::PreserveExecutable => is_owner_executable(&file.path)?,
        };

        Ok(ArchiveEntry {
            name: file.entry_name.clone(),
            contents,
            executable,
        })
    }
}

/// Archive `source` with default options (everything included, fixed modes)
pub fn archive(source: &Path) -> Result<ArchiveBytes, ArchiveError> {
    Archiver::new().archive(source)
}

#[cfg(unix)]
fn is_owner_executable(path: &Path) -> Result<bool, ArchiveError> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path).map_err(|source| ArchiveError::FileReadError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(metadata.permissions().mode() & 0o100 != 0)
}

#[cfg(not(unix))]
fn is_owner_executable(_path: &Path) -> Result<bool, ArchiveError> {
    Ok(false)
}
