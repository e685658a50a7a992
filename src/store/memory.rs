//! In-process artifact store.

use super::ArtifactStore;
use crate::error::StoreError;
use crate::types::ArtifactName;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

/// Keeps objects in memory; useful for dry runs and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    bucket: String,
    ready: Cell<bool>,
    objects: RefCell<BTreeMap<String, Vec<u8>>>,
    uploads: Cell<usize>,
}

impl MemoryStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Self::default()
        }
    }

    /// Seed the store with an existing object
    pub fn with_object(self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.objects.borrow_mut().insert(name.into(), bytes);
        self.ready.set(true);
        self
    }

    /// Number of successful `upload` calls
    pub fn upload_count(&self) -> usize {
        self.uploads.get()
    }

    pub fn object(&self, name: &str) -> Option<Vec<u8>> {
        self.objects.borrow().get(name).cloned()
    }
}

impl ArtifactStore for MemoryStore {
    fn location(&self) -> String {
        self.bucket.clone()
    }

    fn ensure_ready(&self) -> Result<(), StoreError> {
        self.ready.set(true);
        Ok(())
    }

    fn list_existing_names(&self) -> Result<BTreeSet<String>, StoreError> {
        Ok(self.objects.borrow().keys().cloned().collect())
    }

    fn upload(&self, name: &ArtifactName, bytes: &[u8]) -> Result<(), StoreError> {
        if !self.ready.get() {
            return Err(StoreError::Rejected {
                key: name.to_string(),
                reason: format!("bucket {} does not exist", self.bucket),
            });
        }
        self.objects
            .borrow_mut()
            .insert(name.to_string(), bytes.to_vec());
        self.uploads.set(self.uploads.get() + 1);
        Ok(())
    }
}
