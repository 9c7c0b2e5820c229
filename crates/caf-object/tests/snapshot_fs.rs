use std::fs;
use std::path::Path;

use caf_hash::HashAlgorithm;
use caf_object::{Blob, EntryKind, HashConfig, ObjectError, Snapshot, Tree, TreeRecord};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn blob_record(name: &str, content: &str, algo: HashAlgorithm) -> TreeRecord {
    TreeRecord::blob(name, Blob::from_bytes(algo, content.as_bytes()).unwrap().identifier())
}

fn sample_tree(root: &Path) {
    write(root, "README", "hello\n");
    write(root, "src/main.rs", "fn main() {}\n");
    write(root, "src/lib/mod.rs", "// lib\n");
    write(root, "docs/guide.md", "# guide\n");
}

#[test]
fn matches_hand_built_tree() {
    let dir = tempfile::tempdir().unwrap();
    sample_tree(dir.path());
    let algo = HashAlgorithm::Sha1;

    let lib = Tree::from_records([blob_record("mod.rs", "// lib\n", algo)]).unwrap();
    let src = Tree::from_records([
        blob_record("main.rs", "fn main() {}\n", algo),
        TreeRecord::tree("lib", lib.identifier(algo).unwrap()),
    ])
    .unwrap();
    let docs = Tree::from_records([blob_record("guide.md", "# guide\n", algo)]).unwrap();
    let root = Tree::from_records([
        TreeRecord::tree("src", src.identifier(algo).unwrap()),
        blob_record("README", "hello\n", algo),
        TreeRecord::tree("docs", docs.identifier(algo).unwrap()),
    ])
    .unwrap();

    let snapshot = Snapshot::build(dir.path(), &HashConfig::default()).unwrap();
    assert_eq!(snapshot.root_id(), root.identifier(algo).unwrap());
    assert_eq!(snapshot.root(), &root);
    assert_eq!(snapshot.tree(&src.identifier(algo).unwrap()), Some(&src));
    assert_eq!(snapshot.tree_count(), 4);
}

#[test]
fn parallel_and_sequential_agree() {
    let dir = tempfile::tempdir().unwrap();
    sample_tree(dir.path());
    for n in 0..20 {
        write(dir.path(), &format!("wide/d{n}/f.txt"), &format!("{n}"));
    }

    let parallel = HashConfig::default();
    let sequential = HashConfig {
        parallel: false,
        ..HashConfig::default()
    };
    let a = Snapshot::build(dir.path(), &parallel).unwrap();
    let b = Snapshot::build(dir.path(), &sequential).unwrap();
    assert_eq!(a.root_id(), b.root_id());
}

#[test]
fn repository_dir_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "file.txt", "content");
    let before = Snapshot::build(dir.path(), &HashConfig::default()).unwrap();

    write(dir.path(), ".caf/objects/xx", "stored object");
    let after = Snapshot::build(dir.path(), &HashConfig::default()).unwrap();

    assert_eq!(before.root_id(), after.root_id());
    assert!(after.root().get(".caf").is_none());
}

#[test]
fn configured_names_are_ignored_at_every_level() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.txt", "a");
    write(dir.path(), "target/out", "build output");
    write(dir.path(), "sub/target/out", "nested output");
    write(dir.path(), "sub/b.txt", "b");

    let config = HashConfig {
        ignore: vec![".caf".into(), "target".into()],
        ..HashConfig::default()
    };
    let snapshot = Snapshot::build(dir.path(), &config).unwrap();
    let paths: Vec<String> = snapshot
        .walk()
        .into_iter()
        .map(|(path, _)| path.to_string())
        .collect();
    assert_eq!(paths, ["a.txt", "sub", "sub/b.txt"]);
}

#[test]
fn walk_lists_records_in_canonical_order() {
    let dir = tempfile::tempdir().unwrap();
    sample_tree(dir.path());
    let snapshot = Snapshot::build(dir.path(), &HashConfig::default()).unwrap();

    let listing: Vec<(String, EntryKind)> = snapshot
        .walk()
        .into_iter()
        .map(|(path, record)| (path.to_string(), record.kind))
        .collect();
    assert_eq!(
        listing,
        [
            ("README".to_string(), EntryKind::Blob),
            ("docs".to_string(), EntryKind::Tree),
            ("docs/guide.md".to_string(), EntryKind::Blob),
            ("src".to_string(), EntryKind::Tree),
            ("src/lib".to_string(), EntryKind::Tree),
            ("src/lib/mod.rs".to_string(), EntryKind::Blob),
            ("src/main.rs".to_string(), EntryKind::Blob),
        ]
    );
}

#[test]
fn identical_subdirectories_share_a_tree() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "one/f", "same");
    write(dir.path(), "two/f", "same");
    let snapshot = Snapshot::build(dir.path(), &HashConfig::default()).unwrap();

    let one = snapshot.root().get("one").unwrap().oid;
    let two = snapshot.root().get("two").unwrap().oid;
    assert_eq!(one, two);
    assert_eq!(snapshot.tree_count(), 2);
    assert_eq!(snapshot.walk().len(), 4);
}

#[test]
fn empty_directory_is_empty_tree() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("empty")).unwrap();
    let snapshot = Snapshot::build(dir.path(), &HashConfig::default()).unwrap();
    let record = snapshot.root().get("empty").unwrap();
    assert_eq!(record.kind, EntryKind::Tree);
    assert_eq!(
        record.oid,
        Tree::empty().identifier(HashAlgorithm::Sha1).unwrap()
    );
}

#[test]
fn algorithm_comes_from_config() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "f", "x");
    let config = HashConfig {
        algorithm: HashAlgorithm::Sha256,
        ..HashConfig::default()
    };
    let snapshot = Snapshot::build(dir.path(), &config).unwrap();
    assert_eq!(snapshot.root_id().algorithm(), HashAlgorithm::Sha256);
    assert_eq!(
        snapshot.root().get("f").unwrap().oid.algorithm(),
        HashAlgorithm::Sha256
    );
}

#[test]
fn file_path_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "f", "x");
    let err = Snapshot::build(&dir.path().join("f"), &HashConfig::default()).unwrap_err();
    assert!(matches!(err, ObjectError::NotADirectory(_)));
}

#[cfg(unix)]
#[test]
fn executable_bit_is_opt_in() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "run.sh", "#!/bin/sh\n");
    fs::set_permissions(dir.path().join("run.sh"), fs::Permissions::from_mode(0o755)).unwrap();

    let plain = Snapshot::build(dir.path(), &HashConfig::default()).unwrap();
    assert_eq!(plain.root().get("run.sh").unwrap().kind, EntryKind::Blob);

    let config = HashConfig {
        detect_executable: true,
        ..HashConfig::default()
    };
    let detected = Snapshot::build(dir.path(), &config).unwrap();
    assert_eq!(detected.root().get("run.sh").unwrap().kind, EntryKind::Executable);
    assert_ne!(plain.root_id(), detected.root_id());
}

#[cfg(unix)]
#[test]
fn symlinks_to_files_are_followed_and_dangling_ones_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "target.txt", "pointed at");
    std::os::unix::fs::symlink(dir.path().join("target.txt"), dir.path().join("link")).unwrap();
    std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("dangling")).unwrap();
    std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

    let snapshot = Snapshot::build(dir.path(), &HashConfig::default()).unwrap();
    let root = snapshot.root();
    assert_eq!(root.get("link").unwrap().oid, root.get("target.txt").unwrap().oid);
    assert!(root.get("dangling").is_none());
    assert!(root.get("loop").is_none());
}
