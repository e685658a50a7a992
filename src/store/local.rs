//! Directory-backed artifact store.

use super::ArtifactStore;
use crate::error::StoreError;
use crate::types::ArtifactName;
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stores each artifact as a file named after it inside `root`
#[derive(Debug, Clone)]
pub struct LocalDirStore {
    root: PathBuf,
}

impl LocalDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn staging_path(&self, name: &str) -> PathBuf {
        self.root.join(format!(".{}.partial", name))
    }
}

impl ArtifactStore for LocalDirStore {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn ensure_ready(&self) -> Result<(), StoreError> {
        if self.root.is_dir() {
            return Ok(());
        }
        if self.root.exists() {
            return Err(StoreError::NotFound(self.root.clone()));
        }

        info!("Creating bucket {}.", self.root.display());
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    fn list_existing_names(&self) -> Result<BTreeSet<String>, StoreError> {
        if !self.root.is_dir() {
            return Err(StoreError::NotFound(self.root.clone()));
        }

        let mut names = BTreeSet::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            // Staging files are dot-prefixed and never count as stored objects
            match entry.file_name().into_string() {
                Ok(name) if !name.starts_with('.') => {
                    names.insert(name);
                }
                _ => {}
            }
        }
        debug!(count = names.len(), store = %self.root.display(), "Listed stored objects");
        Ok(names)
    }

    fn upload(&self, name: &ArtifactName, bytes: &[u8]) -> Result<(), StoreError> {
        let key = name.as_str();
        if key.starts_with('.') || key.contains(|c| c == '/' || c == '\\') {
            return Err(StoreError::Rejected {
                key: key.to_string(),
                reason: "object names must be plain file names".to_string(),
            });
        }

        let staging = self.staging_path(key);
        let result = (|| {
            let mut file = fs::File::create(&staging)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(&staging, self.root.join(key))
        })();

        if let Err(e) = result {
            let _ = fs::remove_file(&staging);
            return Err(StoreError::Io(e));
        }
        Ok(())
    }
}
