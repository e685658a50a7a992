//! Path canonicalization and entry-name normalization
//!
//! Entry names are the only path information that reaches the archive, so they
//! must look the same on every host: `/` separators, NFC Unicode, no leading
//! `/` or `./`, and no `.`/`..` segments.

use crate::error::ArchiveError;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Expand a leading `~` to `$HOME`
///
/// Paths without a leading `~` (or when `HOME` is unset) are returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Resolve the source root of an archive
///
/// Expands `~`, verifies the path is an existing directory and canonicalizes
/// it with `dunce` so Windows hosts do not end up with `\\?\` prefixes.
pub fn canonicalize_root(path: &Path) -> Result<PathBuf, ArchiveError> {
    let expanded = expand_home(path);
    if !expanded.is_dir() {
        return Err(ArchiveError::DirectoryNotFound(expanded));
    }

    dunce::canonicalize(&expanded).map_err(|e| {
        ArchiveError::InvalidPath(format!("Failed to canonicalize {:?}: {}", expanded, e))
    })
}

/// Build the archive entry name for `path`, relative to `root`
pub fn relative_entry_name(root: &Path, path: &Path) -> Result<String, ArchiveError> {
    let relative = path.strip_prefix(root).map_err(|_| {
        ArchiveError::InvalidPath(format!("{:?} is not under {:?}", path, root))
    })?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => {
                let name = name.to_str().ok_or_else(|| {
                    ArchiveError::InvalidPath(format!("Non UTF-8 file name under {:?}", root))
                })?;
                segments.push(name);
            }
            Component::CurDir => {}
            other => {
                return Err(ArchiveError::InvalidPath(format!(
                    "Unexpected component {:?} in {:?}",
                    other, relative
                )))
            }
        }
    }

    // Components are already split by the host; a `\` inside one is part of the file name
    join_segments(segments, &relative.display().to_string())
}

/// Normalize a caller-supplied relative name into its canonical archive form
///
/// Both `/` and `\` are treated as separators, so a name produced on Windows
/// and one produced on Unix normalize to the same string.
pub fn normalize_entry_name(raw: &str) -> Result<String, ArchiveError> {
    join_segments(raw.split(|c| c == '/' || c == '\\'), raw)
}

/// NFC-normalize each segment, drop empty and `.` segments, reject `..`
fn join_segments<'a>(
    segments: impl IntoIterator<Item = &'a str>,
    raw: &str,
) -> Result<String, ArchiveError> {
    let mut normalized = Vec::new();
    for segment in segments {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(ArchiveError::InvalidPath(format!(
                    "Entry name escapes the source root: {}",
                    raw
                )))
            }
            s => normalized.push(s.nfc().collect::<String>()),
        }
    }

    if normalized.is_empty() {
        return Err(ArchiveError::InvalidPath(format!(
            "Empty entry name: {:?}",
            raw
        )));
    }

    Ok(normalized.join("/"))
}
