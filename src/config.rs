//! Configuration System
//!
//! Hierarchical configuration: defaults, global and workspace TOML files, and
//! environment overrides, merged by the `config` crate and validated before use.

use crate::archive::filter::{FileFilter, PatternList, DEFAULT_INCLUDE};
use crate::archive::writer::PermissionPolicy;
use crate::archive::ArchiveOptions;
use crate::error::{ApiError, ArchiveError};
use crate::fingerprint;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookConfig {
    /// Payload settings
    #[serde(default)]
    pub package: PackageConfig,

    /// Artifact store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// What to package for a function
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Logical function name embedded in the artifact name
    #[serde(default)]
    pub function_name: Option<String>,

    /// Source directory; `~` is expanded
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Inclusion patterns (string or list); defaults to `**`
    #[serde(default)]
    pub include: Option<PatternList>,

    /// Exclusion patterns (string or list); defaults to none
    #[serde(default)]
    pub exclude: Option<PatternList>,

    #[serde(default)]
    pub follow_symlinks: bool,

    /// Write 0755 for owner-executable files instead of 0644 everywhere
    #[serde(default)]
    pub preserve_executable: bool,
}

impl PackageConfig {
    pub fn include_patterns(&self) -> Vec<String> {
        PatternList::resolve(self.include.as_ref(), &[DEFAULT_INCLUDE])
    }

    pub fn exclude_patterns(&self) -> Vec<String> {
        PatternList::resolve(self.exclude.as_ref(), &[])
    }

    /// Compile archive options from this configuration
    pub fn archive_options(&self) -> Result<ArchiveOptions, ArchiveError> {
        Ok(ArchiveOptions {
            filter: FileFilter::new(&self.include_patterns(), &self.exclude_patterns())?,
            follow_symlinks: self.follow_symlinks,
            permissions: if self.preserve_executable {
                PermissionPolicy::PreserveExecutable
            } else {
                PermissionPolicy::Fixed
            },
        })
    }
}

/// Local artifact store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding buckets; relative paths resolve against the workspace
    #[serde(default = "default_store_root")]
    pub root: PathBuf,

    /// Bucket (subdirectory) artifacts are written to
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

fn default_store_root() -> PathBuf {
    PathBuf::from(".lambda-hook/store")
}

fn default_bucket() -> String {
    "lambda-artifacts".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_store_root(),
            bucket: default_bucket(),
        }
    }
}

impl StoreConfig {
    /// Directory of the configured bucket
    pub fn bucket_dir(&self, workspace_root: &Path) -> PathBuf {
        let root = crate::archive::path::expand_home(&self.root);
        let root = if root.is_absolute() {
            root
        } else {
            workspace_root.join(root)
        };
        root.join(&self.bucket)
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Package(String),
    Store(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Package(msg) => write!(f, "Package: {}", msg),
            ValidationError::Store(msg) => write!(f, "Store: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl HookConfig {
    /// Validate the entire configuration, collecting every problem found
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(name) = &self.package.function_name {
            if let Err(e) = fingerprint::validate_function_name(name) {
                errors.push(ValidationError::Package(e.to_string()));
            }
        }
        if let Err(e) = self.package.archive_options() {
            errors.push(ValidationError::Package(e.to_string()));
        }

        if self.store.root.as_os_str().is_empty() {
            errors.push(ValidationError::Store("Store root cannot be empty".to_string()));
        }
        if self.store.bucket.is_empty()
            || self.store.bucket.contains(|c| c == '/' || c == '\\')
        {
            errors.push(ValidationError::Store(format!(
                "Invalid bucket name '{}'",
                self.store.bucket
            )));
        }

        if !matches!(self.logging.format.as_str(), "json" | "text") {
            errors.push(ValidationError::Logging(format!(
                "Invalid log format: {}",
                self.logging.format
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding all errors into one `ApiError`
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }
}
