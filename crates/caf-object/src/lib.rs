//! caf object model: blob, tree and commit identity.
//!
//! Every object is identified by a digest of its canonical form, and trees
//! and commits reference their children only by identifier. Objects are
//! immutable values built bottom-up: blob identifiers first, then trees over
//! already-hashed children, then commits over trees and parent commits.

mod blob;
pub mod canonical;
mod commit;
pub mod config;
pub mod snapshot;
mod tree;

pub use blob::Blob;
pub use commit::Commit;
pub use config::{ConfigError, HashConfig};
pub use snapshot::Snapshot;
pub use tree::{EntryKind, Tree, TreeRecord};

use std::path::PathBuf;

use bstr::BString;
use caf_hash::{HashAlgorithm, HashError, ObjectId};

/// Errors produced by object operations.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("duplicate tree entry '{name}'")]
    DuplicateEntry { name: BString },

    #[error("invalid tree entry name '{name}': {reason}")]
    InvalidEntryName { name: BString, reason: &'static str },

    #[error("tree entry keyed as '{key}' is named '{name}'")]
    EntryNameMismatch { key: BString, name: BString },

    #[error("tree entry '{name}' has no identifier assigned")]
    NullEntryId { name: BString },

    #[error("unknown entry kind: {0}")]
    UnknownEntryKind(String),

    #[error("invalid object kind: {0}")]
    InvalidKind(BString),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot read '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Hash(#[from] HashError),
}

/// The kinds of object in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

impl ObjectKind {
    /// Parse from the kind name used in object headers.
    pub fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        match s {
            b"blob" => Ok(Self::Blob),
            b"tree" => Ok(Self::Tree),
            b"commit" => Ok(Self::Commit),
            _ => Err(ObjectError::InvalidKind(BString::from(s))),
        }
    }

    /// The name written in the digest header of this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
            Self::Commit => "commit",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObjectKind {
    type Err = ObjectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

/// Any object in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl Object {
    /// Get the object kind.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Blob(_) => ObjectKind::Blob,
            Self::Tree(_) => ObjectKind::Tree,
            Self::Commit(_) => ObjectKind::Commit,
        }
    }

    /// The identifier a store files this object under.
    ///
    /// Blobs return their stored identifier; trees and commits digest their
    /// canonical body with `algo`. The only failure is one reported by the
    /// digest primitive itself.
    pub fn identifier(&self, algo: HashAlgorithm) -> Result<ObjectId, HashError> {
        match self {
            Self::Blob(b) => Ok(b.identifier()),
            Self::Tree(t) => t.identifier(algo),
            Self::Commit(c) => c.identifier(algo),
        }
    }
}

impl From<Blob> for Object {
    fn from(blob: Blob) -> Self {
        Self::Blob(blob)
    }
}

impl From<Tree> for Object {
    fn from(tree: Tree) -> Self {
        Self::Tree(tree)
    }
}

impl From<Commit> for Object {
    fn from(commit: Commit) -> Self {
        Self::Commit(commit)
    }
}
