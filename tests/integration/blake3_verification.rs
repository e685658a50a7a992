//! Digest Implementation Verification Tests
//!
//! The digest must be plain BLAKE3 over the archive bytes, rendered as lowercase hex.

use lambda_hook::fingerprint;
use lambda_hook::{archive, digest};
use tempfile::TempDir;

/// Test that the digest matches BLAKE3 directly
#[test]
fn test_digest_matches_blake3() {
    let content = b"test content";

    let ours = fingerprint::digest_bytes(content);
    let direct = blake3::hash(content).to_hex();

    assert_eq!(ours.as_str(), direct.as_str());
}

/// Test that the archive digest is the hash of the archive bytes, nothing more
#[test]
fn test_archive_digest_is_hash_of_bytes() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("handler.py"), "def handler(e, c): pass").unwrap();

    let archive = archive(temp_dir.path()).unwrap();
    let expected = blake3::hash(archive.as_bytes()).to_hex();

    assert_eq!(digest(&archive).as_str(), expected.as_str());
}

/// Known-answer check for the empty input
#[test]
fn test_empty_input_known_value() {
    assert_eq!(
        fingerprint::digest_bytes(b"").as_str(),
        "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
    );
}
