//! Digest computation and artifact naming using BLAKE3

use crate::error::ApiError;
use crate::types::{ArchiveBytes, ArtifactName, Digest, Hash};
use blake3::Hasher;

/// Compute the raw BLAKE3 hash of arbitrary data
pub fn compute_hash(data: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(data);
    *hasher.finalize().as_bytes()
}

/// Digest of a finished archive
///
/// Hashes the archive bytes directly; nothing else is mixed in.
pub fn digest(archive: &ArchiveBytes) -> Digest {
    digest_bytes(archive.as_bytes())
}

/// Digest of an arbitrary byte slice
pub fn digest_bytes(bytes: &[u8]) -> Digest {
    Digest::from_hash(&compute_hash(bytes))
}

/// Format the artifact name `lambda-<function_name>-<digest>.zip`
///
/// Function names must be usable inside an object key: non-empty, no `/` or
/// `\`, no whitespace or control characters.
pub fn artifact_name(function_name: &str, digest: &Digest) -> Result<ArtifactName, ApiError> {
    validate_function_name(function_name)?;
    Ok(ArtifactName::from_parts(function_name, digest))
}

pub fn validate_function_name(function_name: &str) -> Result<(), ApiError> {
    let reason = if function_name.is_empty() {
        Some("must not be empty")
    } else if function_name.contains(|c| c == '/' || c == '\\') {
        Some("must not contain path separators")
    } else if function_name
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        Some("must not contain whitespace or control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ApiError::InvalidFunctionName {
            name: function_name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
