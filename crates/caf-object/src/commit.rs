use bstr::{BStr, BString, ByteSlice};
use caf_hash::{HashAlgorithm, HashError, Hasher, ObjectId};
use tracing::debug;

use crate::canonical::CanonicalWriter;
use crate::ObjectKind;

/// A commit: a point-in-time snapshot of a root tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Identifier of the root tree.
    pub tree: ObjectId,
    /// Parent commit identifiers, in the order they were recorded (empty
    /// for a root commit). The order is part of the commit's identity.
    pub parents: Vec<ObjectId>,
    /// Author identity, free-form.
    pub author: BString,
    /// Commit message.
    pub message: BString,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

impl Commit {
    pub fn new<I>(
        tree: ObjectId,
        author: impl Into<BString>,
        message: impl Into<BString>,
        timestamp: i64,
        parents: I,
    ) -> Self
    where
        I: IntoIterator<Item = ObjectId>,
    {
        Self {
            tree,
            parents: parents.into_iter().collect(),
            author: author.into(),
            message: message.into(),
            timestamp,
        }
    }

    /// The canonical body: tree, author, message, timestamp and then each
    /// parent in recorded order, each as a netstring.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut w = CanonicalWriter::new();
        w.oid(&self.tree)
            .field(&self.author)
            .field(&self.message)
            .text(self.timestamp);
        for parent in &self.parents {
            w.oid(parent);
        }
        w.finish()
    }

    /// Digest the canonical body under the `commit` header.
    pub fn identifier(&self, algo: HashAlgorithm) -> Result<ObjectId, HashError> {
        let body = self.canonical_bytes();
        let oid = Hasher::hash_object(algo, ObjectKind::Commit.as_str(), &body)?;
        debug!(
            oid = %oid.short_hex(),
            tree = %self.tree.short_hex(),
            parents = self.parents.len(),
            "commit identifier"
        );
        Ok(oid)
    }

    /// Get the first parent (or None for root commits).
    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    /// Is this a merge commit? (more than one parent)
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Is this a root commit? (no parents)
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// First line of the message.
    pub fn summary(&self) -> &BStr {
        let msg: &[u8] = self.message.as_ref();
        match msg.find_byte(b'\n') {
            Some(pos) => BStr::new(&msg[..pos]),
            None => BStr::new(msg),
        }
    }

    /// Everything after the first blank line of the message.
    pub fn body(&self) -> Option<&BStr> {
        let msg: &[u8] = self.message.as_ref();
        msg.find(b"\n\n").map(|pos| BStr::new(&msg[pos + 2..]))
    }
}
