//! Integration tests for the upload decision against real stores

use super::test_utils::{set_mtime, write_tree};
use lambda_hook::store::{ArtifactStore, LocalDirStore, MemoryStore};
use lambda_hook::{publish, Archiver, PublishRequest, UploadDecision};
use tempfile::TempDir;

const ALL_FILES: &[&str] = &[
    "f1/f1.py",
    "f1/f1.pyc",
    "f1/__init__.py",
    "f1/test/__init__.py",
    "f1/test/f1.py",
    "f1/test/f1.pyc",
    "f1/test2/test.txt",
    "f2/f2.js",
];

fn functions_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let files: Vec<(&str, &str)> = ALL_FILES.iter().map(|f| (*f, "")).collect();
    write_tree(temp_dir.path(), &files);
    temp_dir
}

/// Publishing the same tree twice uploads once, then finds the object by name
#[test]
fn test_upload_lambda_functions_twice() {
    let tree = functions_tree();
    let store = MemoryStore::new("myBucket");
    let request = PublishRequest {
        function_name: "things".to_string(),
        source: tree.path().to_path_buf(),
    };

    let first = publish(&store, &Archiver::new(), &request).unwrap();
    let second = publish(&store, &Archiver::new(), &request).unwrap();

    assert_eq!(first.decision, UploadDecision::Upload);
    assert_eq!(second.decision, UploadDecision::Skip);
    assert_eq!(store.upload_count(), 1);
    assert!(store.object(first.key.as_str()).is_some());
}

/// Touching every file between runs must not cause a re-upload
#[test]
fn test_touched_tree_is_not_reuploaded() {
    let tree = functions_tree();
    let bucket = TempDir::new().unwrap();
    let store = LocalDirStore::new(bucket.path().join("myBucket"));
    let request = PublishRequest {
        function_name: "things".to_string(),
        source: tree.path().to_path_buf(),
    };

    let first = publish(&store, &Archiver::new(), &request).unwrap();
    for (i, f) in ALL_FILES.iter().enumerate() {
        set_mtime(&tree.path().join(f), 1_600_000_000 + i as u64);
    }
    let second = publish(&store, &Archiver::new(), &request).unwrap();

    assert!(first.uploaded());
    assert!(!second.uploaded());
    assert_eq!(first.key, second.key);
    assert_eq!(store.list_existing_names().unwrap().len(), 1);
}

/// Subdirectories package independently under their own function names
#[test]
fn test_functions_are_named_independently() {
    let tree = functions_tree();
    let store = MemoryStore::new("myBucket");

    let f1 = publish(
        &store,
        &Archiver::new(),
        &PublishRequest {
            function_name: "f1".to_string(),
            source: tree.path().join("f1"),
        },
    )
    .unwrap();
    let f2 = publish(
        &store,
        &Archiver::new(),
        &PublishRequest {
            function_name: "f2".to_string(),
            source: tree.path().join("f2"),
        },
    )
    .unwrap();

    assert!(f1.key.as_str().starts_with("lambda-f1-"));
    assert!(f2.key.as_str().starts_with("lambda-f2-"));
    assert_ne!(f1.digest, f2.digest);
    assert_eq!(store.list_existing_names().unwrap().len(), 2);
}

/// A pre-existing object under the expected name is never overwritten
#[test]
fn test_existing_object_short_circuits() {
    let tree = functions_tree();
    let probe = MemoryStore::new("probe");
    let request = PublishRequest {
        function_name: "things".to_string(),
        source: tree.path().to_path_buf(),
    };
    let expected = publish(&probe, &Archiver::new(), &request).unwrap();

    let store = MemoryStore::new("myBucket").with_object(expected.key.to_string(), b"old".to_vec());
    let outcome = publish(&store, &Archiver::new(), &request).unwrap();

    assert_eq!(outcome.decision, UploadDecision::Skip);
    assert_eq!(store.upload_count(), 0);
    assert_eq!(store.object(expected.key.as_str()).unwrap(), b"old".to_vec());
}
