//! CLI route: single route table and run context. Dispatches to domain services and output.

use crate::archive::filter::FileFilter;
use crate::archive::{ArchiveOptions, Archiver};
use crate::cli::output;
use crate::cli::parse::{Commands, SelectionArgs};
use crate::config::{ConfigLoader, HookConfig};
use crate::error::ApiError;
use crate::fingerprint;
use crate::store::{ArtifactStore, LocalDirStore};
use crate::types::{ArchiveBytes, ArtifactName, Digest};
use crate::upload::{self, PublishRequest};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: workspace and merged configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: HookConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        config.ensure_valid()?;

        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Digest {
                path,
                selection,
                format,
            } => {
                let source = self.source_dir(path.as_deref())?;
                let (archive, digest) = self.build(&source, selection)?;
                output::format_digest(&source, &archive, &digest, format)
            }
            Commands::Name {
                function,
                path,
                selection,
                format,
            } => {
                let function_name = self.function_name(function.as_deref())?;
                let source = self.source_dir(path.as_deref())?;
                let (archive, digest) = self.build(&source, selection)?;
                let name = fingerprint::artifact_name(&function_name, &digest)?;
                output::format_name(&name, &digest, &archive, format)
            }
            Commands::Package {
                function,
                path,
                out,
                selection,
                format,
            } => {
                let function_name = self.function_name(function.as_deref())?;
                let source = self.source_dir(path.as_deref())?;
                let (archive, digest) = self.build(&source, selection)?;
                let name = fingerprint::artifact_name(&function_name, &digest)?;
                let written = self.write_package(out, &name, &archive)?;
                output::format_package(&written, &name, &digest, format)
            }
            Commands::Publish {
                function,
                path,
                store,
                selection,
                format,
            } => {
                let request = PublishRequest {
                    function_name: self.function_name(function.as_deref())?,
                    source: self.source_dir(path.as_deref())?,
                };
                let store_dir = match store {
                    Some(dir) => dir.clone(),
                    None => self.config.store.bucket_dir(&self.workspace_root),
                };
                let store = LocalDirStore::new(store_dir);
                let outcome = upload::publish(&store, &self.archiver(selection)?, &request)?;
                output::format_publish(&outcome, format)
            }
            Commands::Config { format } => output::format_config(&self.config, format),
        }
    }

    fn archiver(&self, selection: &SelectionArgs) -> Result<Archiver, ApiError> {
        let mut options: ArchiveOptions = self.config.package.archive_options()?;
        if !selection.include.is_empty() || !selection.exclude.is_empty() {
            let includes = if selection.include.is_empty() {
                self.config.package.include_patterns()
            } else {
                selection.include.clone()
            };
            let excludes = if selection.exclude.is_empty() {
                self.config.package.exclude_patterns()
            } else {
                selection.exclude.clone()
            };
            options.filter = FileFilter::new(&includes, &excludes)?;
        }
        Ok(Archiver::with_options(options))
    }

    fn build(
        &self,
        source: &Path,
        selection: &SelectionArgs,
    ) -> Result<(ArchiveBytes, Digest), ApiError> {
        let archive = self.archiver(selection)?.archive(source)?;
        let digest = fingerprint::digest(&archive);
        debug!("lambda: ZIP hash: {}", digest);
        Ok((archive, digest))
    }

    fn write_package(
        &self,
        out: &Path,
        name: &ArtifactName,
        archive: &ArchiveBytes,
    ) -> Result<PathBuf, ApiError> {
        let target = LocalDirStore::new(out);
        target.ensure_ready()?;
        target.upload(name, archive.as_bytes())?;
        let written = out.join(name.as_str());
        info!(path = %written.display(), "Wrote package");
        Ok(written)
    }

    fn function_name(&self, flag: Option<&str>) -> Result<String, ApiError> {
        flag.map(str::to_string)
            .or_else(|| self.config.package.function_name.clone())
            .ok_or_else(|| {
                ApiError::ConfigError(
                    "No function name: pass --function or set package.function_name".to_string(),
                )
            })
    }

    /// Source directory from the argument or `package.path`, relative to the workspace
    fn source_dir(&self, arg: Option<&Path>) -> Result<PathBuf, ApiError> {
        if let Some(path) = arg {
            return Ok(path.to_path_buf());
        }
        let configured = self.config.package.path.as_ref().ok_or_else(|| {
            ApiError::ConfigError(
                "No source directory: pass a path or set package.path".to_string(),
            )
        })?;
        let expanded = crate::archive::path::expand_home(configured);
        Ok(if expanded.is_absolute() {
            expanded
        } else {
            self.workspace_root.join(expanded)
        })
    }
}
