//! Include/exclude file selection
//!
//! Patterns are globs relative to the source root and are matched against the
//! normalized entry name. `*` stays inside one path segment, `**` spans any
//! number of them. Exclusions win over inclusions.

use crate::error::ArchiveError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

/// Pattern used when no inclusions are configured.
pub const DEFAULT_INCLUDE: &str = "**";

/// A pattern setting as it appears in configuration: one string or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternList {
    One(String),
    Many(Vec<String>),
}

impl PatternList {
    /// Flatten into a list, using `default` when the setting is empty
    pub fn resolve(setting: Option<&PatternList>, default: &[&str]) -> Vec<String> {
        let patterns = match setting {
            Some(PatternList::One(p)) if !p.is_empty() => vec![p.clone()],
            Some(PatternList::Many(list)) if !list.is_empty() => list.clone(),
            _ => Vec::new(),
        };

        if patterns.is_empty() {
            default.iter().map(|p| p.to_string()).collect()
        } else {
            patterns
        }
    }
}

impl From<&str> for PatternList {
    fn from(pattern: &str) -> Self {
        PatternList::One(pattern.to_string())
    }
}

impl From<Vec<String>> for PatternList {
    fn from(patterns: Vec<String>) -> Self {
        PatternList::Many(patterns)
    }
}

/// Compiled include/exclude matcher
#[derive(Debug, Clone)]
pub struct FileFilter {
    includes: GlobSet,
    excludes: GlobSet,
}

impl FileFilter {
    /// Compile inclusion and exclusion patterns
    ///
    /// An empty `includes` list falls back to [`DEFAULT_INCLUDE`].
    pub fn new(includes: &[String], excludes: &[String]) -> Result<Self, ArchiveError> {
        let includes = if includes.is_empty() {
            compile(&[DEFAULT_INCLUDE.to_string()])?
        } else {
            compile(includes)?
        };

        Ok(Self {
            includes,
            excludes: compile(excludes)?,
        })
    }

    /// Whether a normalized entry name belongs in the archive
    pub fn is_selected(&self, entry_name: &str) -> bool {
        self.includes.is_match(entry_name) && !self.excludes.is_match(entry_name)
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self {
            includes: compile(&[DEFAULT_INCLUDE.to_string()]).unwrap_or_else(|_| GlobSet::empty()),
            excludes: GlobSet::empty(),
        }
    }
}

fn compile(patterns: &[String]) -> Result<GlobSet, ArchiveError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| ArchiveError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
        builder.add(glob);
    }

    builder.build().map_err(|e| ArchiveError::InvalidPattern {
        pattern: patterns.join(", "),
        message: format!("Failed to build glob set: {}", e),
    })
}
