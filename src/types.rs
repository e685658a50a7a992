//! Core value types: archive bytes, digests and artifact names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// BLAKE3 output (32 bytes)
pub type Hash = [u8; 32];

/// Length of a rendered digest in hex characters.
pub const DIGEST_HEX_LEN: usize = 64;

/// Prefix shared by every artifact name.
pub const ARTIFACT_PREFIX: &str = "lambda-";

/// Extension shared by every artifact name.
pub const ARTIFACT_EXTENSION: &str = ".zip";

/// Immutable bytes of a finished archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveBytes {
    bytes: Vec<u8>,
    entry_count: usize,
}

impl ArchiveBytes {
    pub(crate) fn new(bytes: Vec<u8>, entry_count: usize) -> Self {
        Self { bytes, entry_count }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of file entries stored in the archive
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }
}

impl AsRef<[u8]> for ArchiveBytes {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Lowercase hex rendering of a 256-bit content hash
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    pub fn from_hash(hash: &Hash) -> Self {
        Digest(hex::encode(hash))
    }

    /// Parse a rendered digest; only 64 lowercase hex characters are accepted
    pub fn parse(s: &str) -> Option<Self> {
        let valid = s.len() == DIGEST_HEX_LEN
            && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        valid.then(|| Digest(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Digest {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Digest::parse(&value).ok_or_else(|| format!("not a 64 character lowercase hex digest: {value}"))
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

/// Deduplication key of the form `lambda-<function>-<digest>.zip`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactName(String);

impl ArtifactName {
    pub(crate) fn from_parts(function_name: &str, digest: &Digest) -> Self {
        ArtifactName(format!(
            "{ARTIFACT_PREFIX}{function_name}-{digest}{ARTIFACT_EXTENSION}"
        ))
    }

    /// Split a stored object name back into function name and digest
    ///
    /// Returns `None` for names that do not follow the artifact convention.
    pub fn parse(name: &str) -> Option<(String, Digest)> {
        let stem = name
            .strip_prefix(ARTIFACT_PREFIX)?
            .strip_suffix(ARTIFACT_EXTENSION)?;
        let (function_name, digest) = stem.rsplit_once('-')?;
        if function_name.is_empty() {
            return None;
        }
        Some((function_name.to_string(), Digest::parse(digest)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArtifactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
