use lambda_hook::archive::writer::{write_archive, ArchiveEntry, PermissionPolicy};
use lambda_hook::fingerprint;
use lambda_hook::{archive, digest};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// File names start with `f_`, directories with `d_`, so no file shadows a directory
fn tree_strategy() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    let name = prop_oneof![
        "f_[a-z0-9]{1,6}\\.txt",
        "d_[a-z]{1,3}/f_[a-z0-9]{1,6}\\.txt",
        "d_[a-z]{1,3}/d_[a-z]{1,2}/f_[a-z0-9]{1,4}",
    ];
    prop::collection::btree_map(name, prop::collection::vec(any::<u8>(), 0..64), 0..8)
}

fn materialize(root: &Path, files: &[(&String, &Vec<u8>)]) {
    for (name, contents) in files {
        let path = root.join(name.as_str());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
}

/// Test that the digest of raw bytes is deterministic and content-sensitive
#[test]
fn test_digest_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(any::<Vec<u8>>(), any::<Vec<u8>>()),
            |(content1, content2)| {
                let d1 = fingerprint::digest_bytes(&content1);
                let d2 = fingerprint::digest_bytes(&content2);

                prop_assert_eq!(d1.clone(), fingerprint::digest_bytes(&content1));
                if content1 == content2 {
                    prop_assert_eq!(d1, d2);
                } else {
                    prop_assert_ne!(d1, d2);
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Entry order never changes the archive bytes
#[test]
fn test_entry_order_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(tree_strategy(), any::<u64>()), |(tree, seed)| {
            let entries: Vec<ArchiveEntry> = tree
                .iter()
                .map(|(name, contents)| ArchiveEntry::new(name, contents.clone()).unwrap())
                .collect();

            let mut shuffled = entries.clone();
            if !shuffled.is_empty() {
                let len = shuffled.len();
                shuffled.rotate_left((seed as usize) % len);
                shuffled.reverse();
            }

            let a = write_archive(entries, PermissionPolicy::Fixed).unwrap();
            let b = write_archive(shuffled, PermissionPolicy::Fixed).unwrap();
            prop_assert_eq!(a, b);
            Ok(())
        })
        .unwrap();
}

/// Trees with identical contents built in opposite orders hash the same
#[test]
fn test_independent_trees_property() {
    let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig::with_cases(32));

    runner
        .run(&tree_strategy(), |tree| {
            let forward: Vec<_> = tree.iter().collect();
            let backward: Vec<_> = tree.iter().rev().collect();

            let first = TempDir::new().unwrap();
            let second = TempDir::new().unwrap();
            materialize(first.path(), &forward);
            materialize(second.path(), &backward);

            let a = digest(&archive(first.path()).unwrap());
            let b = digest(&archive(second.path()).unwrap());
            prop_assert_eq!(a, b);
            Ok(())
        })
        .unwrap();
}

/// Changing one byte of one file always changes the digest
#[test]
fn test_single_byte_sensitivity_property() {
    let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig::with_cases(32));

    runner
        .run(
            &(tree_strategy(), any::<prop::sample::Index>(), any::<u8>()),
            |(tree, index, flip)| {
                prop_assume!(!tree.is_empty());
                let entries: Vec<_> = tree.iter().collect();

                let dir = TempDir::new().unwrap();
                materialize(dir.path(), &entries);
                let before = digest(&archive(dir.path()).unwrap());

                let (name, contents) = entries[index.index(entries.len())];
                let mut changed = contents.clone();
                match changed.first_mut() {
                    Some(b) => *b ^= flip | 1,
                    None => changed.push(flip),
                }
                fs::write(dir.path().join(name.as_str()), &changed).unwrap();

                let after = digest(&archive(dir.path()).unwrap());
                prop_assert_ne!(before, after);
                Ok(())
            },
        )
        .unwrap();
}
