//! Filesystem walker for collecting archive inputs

use crate::archive::filter::FileFilter;
use crate::archive::path;
use crate::error::ArchiveError;
use std::path::PathBuf;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// A regular file selected for archiving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path on the host
    pub path: PathBuf,
    /// Normalized `/`-separated name relative to the walk root
    pub entry_name: String,
    /// Size reported when the file was listed
    pub size: u64,
}

/// Filesystem walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false for determinism)
    pub follow_symlinks: bool,
    /// Include/exclude selection applied to entry names
    pub filter: FileFilter,
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the filesystem and collect all selected files
    ///
    /// Returns files sorted by entry name. Directories produce no entries of
    /// their own, and symlinks are skipped unless `follow_symlinks` is set.
    pub fn walk(&self) -> Result<Vec<SourceFile>, ArchiveError> {
        let root = path::canonicalize_root(&self.root)?;
        let mut files = Vec::new();

        let walker = WalkDir::new(&root).follow_links(self.config.follow_symlinks);

        for entry in walker {
            let entry = entry.map_err(|e| match (e.path(), e.io_error()) {
                (Some(p), Some(io)) => ArchiveError::FileReadError {
                    path: p.to_path_buf(),
                    source: std::io::Error::new(io.kind(), io.to_string()),
                },
                _ => ArchiveError::Walk(e.to_string()),
            })?;

            if entry.path() == root {
                continue;
            }

            let metadata = entry.metadata().map_err(|e| ArchiveError::FileReadError {
                path: entry.path().to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
            })?;

            if !metadata.is_file() {
                if !metadata.is_dir() {
                    debug!(path = %entry.path().display(), "Skipping non-regular file");
                }
                continue;
            }

            let entry_name = path::relative_entry_name(&root, entry.path())?;
            if !self.config.filter.is_selected(&entry_name) {
                trace!(entry = %entry_name, "Excluded by pattern");
                continue;
            }

            files.push(SourceFile {
                path: entry.path().to_path_buf(),
                entry_name,
                size: metadata.len(),
            });
        }

        // Sort by entry name, never by host iteration order
        files.sort_by(|a, b| a.entry_name.cmp(&b.entry_name));

        Ok(files)
    }
}
