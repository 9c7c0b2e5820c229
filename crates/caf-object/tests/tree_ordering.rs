use std::collections::HashMap;

use caf_hash::{HashAlgorithm, Hasher, ObjectId};
use caf_object::{EntryKind, Tree, TreeRecord};
use proptest::prelude::*;

fn blob_id(content: &str) -> ObjectId {
    Hasher::digest(HashAlgorithm::Sha1, content.as_bytes()).unwrap()
}

fn tree_id(records: Vec<TreeRecord>) -> ObjectId {
    Tree::from_records(records)
        .unwrap()
        .identifier(HashAlgorithm::Sha1)
        .unwrap()
}

#[test]
fn single_entry_trees_hash_identically() {
    let h1 = blob_id("one");
    let first = tree_id(vec![TreeRecord::blob("a.txt", h1)]);
    let second = tree_id(vec![TreeRecord::blob("a.txt", h1)]);
    assert_eq!(first, second);
}

#[test]
fn two_entries_in_either_order() {
    let h1 = blob_id("one");
    let h2 = blob_id("two");
    let ba = tree_id(vec![TreeRecord::blob("b", h1), TreeRecord::blob("a", h2)]);
    let ab = tree_id(vec![TreeRecord::blob("a", h2), TreeRecord::blob("b", h1)]);
    assert_eq!(ba, ab);
}

#[test]
fn hash_map_construction_matches_record_list() {
    let h1 = blob_id("one");
    let h2 = blob_id("two");
    let mut map = HashMap::new();
    map.insert("src", TreeRecord::tree("src", h1));
    map.insert("README", TreeRecord::blob("README", h2));

    let from_map = Tree::from_entries(map).unwrap();
    let from_list = Tree::from_records([
        TreeRecord::blob("README", h2),
        TreeRecord::tree("src", h1),
    ])
    .unwrap();
    assert_eq!(from_map, from_list);
}

#[test]
fn ordering_is_by_raw_bytes() {
    let h = blob_id("x");
    let tree = Tree::from_records(
        ["zeta", "Alpha", "alpha", "_x", "10", "9", "a.b", "a-b", "\u{e9}"]
            .into_iter()
            .map(|n| TreeRecord::blob(n, h)),
    )
    .unwrap();
    let names: Vec<String> = tree.names().map(|n| n.to_string()).collect();
    assert_eq!(
        names,
        ["10", "9", "Alpha", "_x", "a-b", "a.b", "alpha", "zeta", "\u{e9}"]
    );
}

#[test]
fn directories_sort_by_name_only() {
    // A directory named "foo" and a file "foo.c" are ordered purely by name.
    let h = blob_id("x");
    let tree = Tree::from_records([
        TreeRecord::blob("foo.c", h),
        TreeRecord::tree("foo", h),
        TreeRecord::new("foo-bar", EntryKind::Executable, h),
    ])
    .unwrap();
    let names: Vec<String> = tree.names().map(|n| n.to_string()).collect();
    assert_eq!(names, ["foo", "foo-bar", "foo.c"]);
}

fn entry_set() -> impl Strategy<Value = Vec<TreeRecord>> {
    proptest::collection::btree_map("[a-zA-Z0-9._-]{1,12}", (0u8..5, any::<u32>()), 0..24)
        .prop_map(|entries| {
            entries
                .into_iter()
                .map(|(name, (tag, seed))| {
                    let kind = EntryKind::from_tag(tag).unwrap();
                    let oid = Hasher::digest(HashAlgorithm::Sha1, &seed.to_be_bytes()).unwrap();
                    TreeRecord::new(name, kind, oid)
                })
                .collect()
        })
}

proptest! {
    #[test]
    fn any_permutation_gives_same_identifier(
        (records, shuffled) in entry_set().prop_flat_map(|records| {
            let shuffled = Just(records.clone()).prop_shuffle();
            (Just(records), shuffled)
        })
    ) {
        prop_assert_eq!(tree_id(records), tree_id(shuffled));
    }

    #[test]
    fn iteration_is_sorted_after_shuffle(
        shuffled in entry_set().prop_flat_map(|records| Just(records).prop_shuffle())
    ) {
        let tree = Tree::from_records(shuffled.clone()).unwrap();
        let names: Vec<Vec<u8>> = tree.iter().map(|r| r.name.to_vec()).collect();
        let mut expected: Vec<Vec<u8>> = shuffled.iter().map(|r| r.name.to_vec()).collect();
        expected.sort();
        prop_assert_eq!(names, expected);
    }
}
