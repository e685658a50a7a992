//! Integration tests for archive determinism

use super::test_utils::{set_mtime, write_tree};
use lambda_hook::archive::writer::{self, ArchiveEntry, PermissionPolicy};
use lambda_hook::{archive, digest, ArchiveError};
use std::fs;
use tempfile::TempDir;

/// Same directory archived twice gives identical bytes
#[test]
fn test_same_directory_same_archive() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(
        temp_dir.path(),
        &[("a.txt", "hello"), ("b/c.txt", "world"), ("b/d/e.bin", "\x00\x01\x02")],
    );

    let first = archive(temp_dir.path()).unwrap();
    let second = archive(temp_dir.path()).unwrap();

    assert_eq!(first.as_bytes(), second.as_bytes());
    assert_eq!(digest(&first), digest(&second));
}

/// Touching modification times alone leaves the digest unchanged
#[test]
fn test_timestamp_independence() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("a.txt", "hello"), ("b/c.txt", "world")]);
    set_mtime(&temp_dir.path().join("a.txt"), 1_000_000);
    set_mtime(&temp_dir.path().join("b/c.txt"), 1_000_000);

    let before = digest(&archive(temp_dir.path()).unwrap());

    set_mtime(&temp_dir.path().join("a.txt"), 1_700_000_000);
    set_mtime(&temp_dir.path().join("b/c.txt"), 42);

    let after = digest(&archive(temp_dir.path()).unwrap());
    assert_eq!(before, after);
}

/// Names written with either separator style produce identical archives
#[test]
fn test_path_separator_independence() {
    let unix_style = vec![
        ArchiveEntry::new("a.txt", b"hello".to_vec()).unwrap(),
        ArchiveEntry::new("b/c.txt", b"world".to_vec()).unwrap(),
    ];
    let windows_style = vec![
        ArchiveEntry::new("a.txt", b"hello".to_vec()).unwrap(),
        ArchiveEntry::new("b\\c.txt", b"world".to_vec()).unwrap(),
    ];

    let unix_bytes = writer::write_archive(unix_style, PermissionPolicy::Fixed).unwrap();
    let windows_bytes = writer::write_archive(windows_style, PermissionPolicy::Fixed).unwrap();
    assert_eq!(unix_bytes, windows_bytes);
}

/// Presenting entries in a different order yields identical bytes
#[test]
fn test_order_independence() {
    let names = ["z.txt", "a/b.txt", "m.txt", "a/a.txt"];
    let forward: Vec<_> = names
        .iter()
        .map(|n| ArchiveEntry::new(n, n.as_bytes().to_vec()).unwrap())
        .collect();
    let reversed: Vec<_> = forward.iter().rev().cloned().collect();

    assert_eq!(
        writer::write_archive(forward, PermissionPolicy::Fixed).unwrap(),
        writer::write_archive(reversed, PermissionPolicy::Fixed).unwrap()
    );
}

/// Directory trees created in a different order hash the same
#[test]
fn test_creation_order_independence() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_tree(
        first.path(),
        &[("a.txt", "1"), ("b/c.txt", "2"), ("b/a.txt", "3"), ("z.txt", "4")],
    );
    write_tree(
        second.path(),
        &[("z.txt", "4"), ("b/a.txt", "3"), ("b/c.txt", "2"), ("a.txt", "1")],
    );

    assert_eq!(
        archive(first.path()).unwrap().as_bytes(),
        archive(second.path()).unwrap().as_bytes()
    );
}

#[test]
fn test_content_change_changes_digest() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("a.txt", "hello")]);
    let before = digest(&archive(temp_dir.path()).unwrap());

    fs::write(temp_dir.path().join("a.txt"), "hellp").unwrap();
    let after = digest(&archive(temp_dir.path()).unwrap());

    assert_ne!(before, after);
}

#[test]
fn test_file_addition_changes_digest() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("a.txt", "hello")]);
    let before = digest(&archive(temp_dir.path()).unwrap());

    write_tree(temp_dir.path(), &[("b.txt", "")]);
    let after = digest(&archive(temp_dir.path()).unwrap());

    assert_ne!(before, after);
}

#[test]
fn test_file_removal_changes_digest() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("a.txt", "hello"), ("b.txt", "")]);
    let before = digest(&archive(temp_dir.path()).unwrap());

    fs::remove_file(temp_dir.path().join("b.txt")).unwrap();
    let after = digest(&archive(temp_dir.path()).unwrap());

    assert_ne!(before, after);
}

#[test]
fn test_rename_changes_digest() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("a.txt", "hello")]);
    let before = digest(&archive(temp_dir.path()).unwrap());

    fs::rename(temp_dir.path().join("a.txt"), temp_dir.path().join("b.txt")).unwrap();
    let after = digest(&archive(temp_dir.path()).unwrap());

    assert_ne!(before, after);
}

/// Moving a file into a subdirectory is a rename too
#[test]
fn test_move_into_directory_changes_digest() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("a.txt", "hello")]);
    let before = digest(&archive(temp_dir.path()).unwrap());

    fs::create_dir(temp_dir.path().join("sub")).unwrap();
    fs::rename(temp_dir.path().join("a.txt"), temp_dir.path().join("sub/a.txt")).unwrap();
    let after = digest(&archive(temp_dir.path()).unwrap());

    assert_ne!(before, after);
}

/// Empty subdirectories do not contribute entries
#[test]
fn test_empty_subdirectory_ignored() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("a.txt", "hello")]);
    let before = digest(&archive(temp_dir.path()).unwrap());

    fs::create_dir(temp_dir.path().join("empty")).unwrap();
    let after = digest(&archive(temp_dir.path()).unwrap());

    assert_eq!(before, after);
}

/// An empty directory archives to the bare end-of-central-directory record
#[test]
fn test_empty_directory_fixed_digest() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    let a = archive(first.path()).unwrap();
    let b = archive(second.path()).unwrap();

    let mut expected = vec![0x50, 0x4b, 0x05, 0x06];
    expected.extend_from_slice(&[0u8; 18]);
    assert_eq!(a.as_bytes(), expected.as_slice());
    assert_eq!(a.entry_count(), 0);
    assert_eq!(digest(&a), digest(&b));
    assert_eq!(digest(&a), lambda_hook::fingerprint::digest_bytes(&expected));
}

#[test]
fn test_missing_directory_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = archive(&temp_dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, ArchiveError::DirectoryNotFound(_)));
}

#[test]
fn test_file_as_source_is_directory_not_found() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("a.txt", "hello")]);

    let err = archive(&temp_dir.path().join("a.txt")).unwrap_err();
    assert!(matches!(err, ArchiveError::DirectoryNotFound(_)));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_read_error() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("secret.txt", "hidden")]);
    let secret = temp_dir.path().join("secret.txt");
    fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read regardless of mode
    if fs::read(&secret).is_ok() {
        return;
    }

    let err = archive(temp_dir.path()).unwrap_err();
    assert!(matches!(err, ArchiveError::FileReadError { .. }));
}
