//! lambda-hook: deterministic Lambda payload packaging
//!
//! Zips a function directory into a canonical archive, fingerprints the archive
//! bytes, and names the artifact `lambda-<function>-<digest>.zip`. Identical
//! directory contents give identical names on any host, so a store lookup by
//! name decides whether an upload is needed.

pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod logging;
pub mod store;
pub mod types;
pub mod upload;

pub use archive::{archive, ArchiveOptions, Archiver};
pub use error::{ApiError, ArchiveError, StoreError};
pub use fingerprint::{artifact_name, digest};
pub use types::{ArchiveBytes, ArtifactName, Digest};
pub use upload::{decide_upload, publish, PublishOutcome, PublishRequest, UploadDecision};
