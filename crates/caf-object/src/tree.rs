use std::collections::BTreeMap;

use bstr::{BStr, BString, ByteSlice};
use caf_hash::{HashAlgorithm, HashError, Hasher, ObjectId};
use tracing::trace;

use crate::canonical::CanonicalWriter;
use crate::{ObjectError, ObjectKind};

/// Kind of object a tree record points at.
///
/// Each kind carries a numeric tag that is written into the canonical tree
/// body. Tags are stable: a tag is never reassigned to another kind, and new
/// kinds get new tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file content (tag 0).
    Blob,
    /// Subdirectory (tag 1).
    Tree,
    /// File content with the executable bit set (tag 2).
    Executable,
    /// Symbolic link; the blob holds the link target (tag 3).
    Symlink,
    /// Reference to a commit in another repository (tag 4).
    Gitlink,
}

impl EntryKind {
    pub const ALL: [EntryKind; 5] = [
        Self::Blob,
        Self::Tree,
        Self::Executable,
        Self::Symlink,
        Self::Gitlink,
    ];

    /// The stable discriminant written into canonical tree bodies.
    pub const fn tag(&self) -> u8 {
        match self {
            Self::Blob => 0,
            Self::Tree => 1,
            Self::Executable => 2,
            Self::Symlink => 3,
            Self::Gitlink => 4,
        }
    }

    pub fn from_tag(tag: u8) -> Result<Self, ObjectError> {
        Self::ALL
            .into_iter()
            .find(|k| k.tag() == tag)
            .ok_or_else(|| ObjectError::UnknownEntryKind(tag.to_string()))
    }

    /// Human-readable name, as printed in listings.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
            Self::Executable => "exec",
            Self::Symlink => "symlink",
            Self::Gitlink => "gitlink",
        }
    }

    /// Is this a tree (directory) entry?
    pub fn is_tree(&self) -> bool {
        matches!(self, Self::Tree)
    }

    /// Is this a file-content entry?
    pub fn is_blob(&self) -> bool {
        matches!(self, Self::Blob | Self::Executable)
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts either the name (`blob`) or the numeric tag (`0`).
impl std::str::FromStr for EntryKind {
    type Err = ObjectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(kind) = Self::ALL.into_iter().find(|k| k.name() == s) {
            return Ok(kind);
        }
        match s.parse::<u8>() {
            Ok(tag) => Self::from_tag(tag),
            Err(_) => Err(ObjectError::UnknownEntryKind(s.to_string())),
        }
    }
}

/// A single directory entry: a name bound to an already-hashed child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeRecord {
    pub name: BString,
    pub kind: EntryKind,
    pub oid: ObjectId,
}

impl TreeRecord {
    pub fn new(name: impl Into<BString>, kind: EntryKind, oid: ObjectId) -> Self {
        Self {
            name: name.into(),
            kind,
            oid,
        }
    }

    /// A regular-file record.
    pub fn blob(name: impl Into<BString>, oid: ObjectId) -> Self {
        Self::new(name, EntryKind::Blob, oid)
    }

    /// A subdirectory record.
    pub fn tree(name: impl Into<BString>, oid: ObjectId) -> Self {
        Self::new(name, EntryKind::Tree, oid)
    }

    fn validate(&self) -> Result<(), ObjectError> {
        let reason = if self.name.is_empty() {
            Some("name is empty")
        } else if self.name.contains(&b'/') {
            Some("name contains '/'")
        } else if self.name.contains(&0) {
            Some("name contains NUL")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(ObjectError::InvalidEntryName {
                name: self.name.clone(),
                reason,
            });
        }
        if self.oid.is_null() {
            return Err(ObjectError::NullEntryId {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// A directory: an immutable mapping from entry name to record.
///
/// Records are kept in an ordered map, so iteration is always ascending by
/// the bytes of the name no matter in which order they were supplied. That
/// order is what makes the identifier independent of how the entries were
/// discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    records: BTreeMap<BString, TreeRecord>,
}

impl Tree {
    /// A tree with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a tree from records in any order.
    ///
    /// Rejects duplicate names, empty names or names containing `/` or NUL,
    /// and records whose identifier is still the null placeholder.
    pub fn from_records<I>(records: I) -> Result<Self, ObjectError>
    where
        I: IntoIterator<Item = TreeRecord>,
    {
        let mut map = BTreeMap::new();
        for record in records {
            record.validate()?;
            if map.contains_key(&record.name) {
                return Err(ObjectError::DuplicateEntry { name: record.name });
            }
            map.insert(record.name.clone(), record);
        }
        Ok(Self { records: map })
    }

    /// Build a tree from `(name, record)` pairs, e.g. a hash map filled
    /// while enumerating a directory. Each key must equal its record's name.
    pub fn from_entries<I, K>(entries: I) -> Result<Self, ObjectError>
    where
        I: IntoIterator<Item = (K, TreeRecord)>,
        K: Into<BString>,
    {
        let records = entries
            .into_iter()
            .map(|(key, record)| {
                let key = key.into();
                if key != record.name {
                    return Err(ObjectError::EntryNameMismatch {
                        key,
                        name: record.name,
                    });
                }
                Ok(record)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_records(records)
    }

    /// Lookup an entry by name. A missing name is `None`, not an error.
    pub fn get(&self, name: impl AsRef<[u8]>) -> Option<&TreeRecord> {
        self.records.get(name.as_ref().as_bstr())
    }

    pub fn contains(&self, name: impl AsRef<[u8]>) -> bool {
        self.get(name).is_some()
    }

    /// Iterate records in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = &TreeRecord> {
        self.records.values()
    }

    /// Entry names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &BStr> {
        self.records.keys().map(|k| k.as_bstr())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A copy of this tree with `record` added, replacing any entry of the
    /// same name.
    pub fn with_record(&self, record: TreeRecord) -> Result<Self, ObjectError> {
        record.validate()?;
        let mut records = self.records.clone();
        records.insert(record.name.clone(), record);
        Ok(Self { records })
    }

    /// A copy of this tree without the entry called `name`.
    pub fn without(&self, name: impl AsRef<[u8]>) -> Self {
        let mut records = self.records.clone();
        records.remove(name.as_ref().as_bstr());
        Self { records }
    }

    /// The canonical body: for each record in name order, the name, the
    /// kind tag and the child identifier, each as a netstring.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut w = CanonicalWriter::new();
        for record in self.iter() {
            w.field(&record.name)
                .text(record.kind.tag())
                .oid(&record.oid);
        }
        w.finish()
    }

    /// Digest the canonical body under the `tree` header.
    pub fn identifier(&self, algo: HashAlgorithm) -> Result<ObjectId, HashError> {
        let body = self.canonical_bytes();
        let oid = Hasher::hash_object(algo, ObjectKind::Tree.as_str(), &body)?;
        trace!(oid = %oid.short_hex(), records = self.len(), "tree identifier");
        Ok(oid)
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a TreeRecord;
    type IntoIter = std::collections::btree_map::Values<'a, BString, TreeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}
