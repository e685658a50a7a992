//! Artifact stores: where packaged archives are kept and looked up by name.

mod local;
mod memory;

pub use local::LocalDirStore;
pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::types::ArtifactName;
use std::collections::BTreeSet;

/// Remote object store holding packaged artifacts
///
/// Object names are compared by exact string equality; the store never
/// inspects object contents.
pub trait ArtifactStore {
    /// Human-readable location (bucket name, directory)
    fn location(&self) -> String;

    /// Create the bucket or directory when it does not exist yet
    fn ensure_ready(&self) -> Result<(), StoreError>;

    /// Names of every object currently stored
    fn list_existing_names(&self) -> Result<BTreeSet<String>, StoreError>;

    /// Store `bytes` under `name`, replacing nothing on failure
    fn upload(&self, name: &ArtifactName, bytes: &[u8]) -> Result<(), StoreError>;
}
