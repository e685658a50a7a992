//! Upload decision and publish flow
//!
//! A payload is uploaded only when its artifact name is absent from the store.
//! Because the name embeds the archive digest, an unchanged source directory
//! maps to a name that is already present and nothing is sent.

use crate::archive::Archiver;
use crate::error::ApiError;
use crate::fingerprint;
use crate::store::ArtifactStore;
use crate::types::{ArtifactName, Digest};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, info};

/// Whether an artifact must be sent to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadDecision {
    Upload,
    Skip,
}

/// Decide by exact name membership
pub fn decide_upload(name: &ArtifactName, existing: &BTreeSet<String>) -> UploadDecision {
    if existing.contains(name.as_str()) {
        UploadDecision::Skip
    } else {
        UploadDecision::Upload
    }
}

/// One function payload to package and publish
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub function_name: String,
    pub source: PathBuf,
}

/// Where a payload ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishOutcome {
    pub bucket: String,
    pub key: ArtifactName,
    pub digest: Digest,
    pub decision: UploadDecision,
    pub archive_bytes: usize,
}

impl PublishOutcome {
    pub fn uploaded(&self) -> bool {
        self.decision == UploadDecision::Upload
    }
}

/// Package `request.source`, name it, and upload it unless already stored
pub fn publish<S: ArtifactStore + ?Sized>(
    store: &S,
    archiver: &Archiver,
    request: &PublishRequest,
) -> Result<PublishOutcome, ApiError> {
    fingerprint::validate_function_name(&request.function_name)?;
    debug!("lambda: processing function {}", request.function_name);

    store.ensure_ready()?;

    let archive = archiver.archive(&request.source)?;
    let digest = fingerprint::digest(&archive);
    debug!("lambda: ZIP hash: {}", digest);

    let key = fingerprint::artifact_name(&request.function_name, &digest)?;
    let existing = store.list_existing_names()?;
    let decision = decide_upload(&key, &existing);

    match decision {
        UploadDecision::Skip => {
            info!("lambda: object {} already exists, not uploading", key);
        }
        UploadDecision::Upload => {
            info!("lambda: uploading object {}", key);
            store.upload(&key, archive.as_bytes())?;
        }
    }

    Ok(PublishOutcome {
        bucket: store.location(),
        key,
        digest,
        decision,
        archive_bytes: archive.len(),
    })
}
