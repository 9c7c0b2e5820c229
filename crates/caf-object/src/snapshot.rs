//! Hashing a directory on disk into a tree, without writing any object.
//!
//! Directories are hashed bottom-up: every child (file digest or nested
//! directory) is finished before its parent tree is built. Siblings do not
//! depend on each other, so with `HashConfig::parallel` they are hashed on
//! the rayon pool and joined before the parent.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use bstr::{BString, ByteVec};
use caf_hash::ObjectId;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{Blob, EntryKind, HashConfig, ObjectError, Tree, TreeRecord};

/// The trees built from one directory, keyed by identifier.
#[derive(Debug, Clone)]
pub struct Snapshot {
    root_id: ObjectId,
    trees: HashMap<ObjectId, Tree>,
}

struct Child {
    name: BString,
    path: PathBuf,
    kind: ChildKind,
}

enum ChildKind {
    File { executable: bool },
    Dir,
}

/// A finished directory: its identifier, its tree, and every tree below it.
struct Built {
    oid: ObjectId,
    trees: Vec<(ObjectId, Tree)>,
}

impl Snapshot {
    /// Hash the directory at `dir` and everything below it.
    pub fn build(dir: &Path, config: &HashConfig) -> Result<Self, ObjectError> {
        if !dir.is_dir() {
            return Err(ObjectError::NotADirectory(dir.to_path_buf()));
        }
        let built = build_dir(dir, config)?;
        debug!(
            path = %dir.display(),
            root = %built.oid,
            trees = built.trees.len(),
            "snapshot built"
        );
        Ok(Self {
            root_id: built.oid,
            trees: built.trees.into_iter().collect(),
        })
    }

    /// Identifier of the root tree.
    pub fn root_id(&self) -> ObjectId {
        self.root_id
    }

    /// The root tree.
    pub fn root(&self) -> &Tree {
        // Every build inserts the root tree under `root_id`.
        &self.trees[&self.root_id]
    }

    /// Look up any tree of this snapshot by identifier.
    pub fn tree(&self, oid: &ObjectId) -> Option<&Tree> {
        self.trees.get(oid)
    }

    /// Number of distinct trees; identical subdirectories share one.
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Every record, depth first in canonical order, with its path from
    /// the root joined by `/`.
    pub fn walk(&self) -> Vec<(BString, &TreeRecord)> {
        let mut out = Vec::new();
        self.walk_tree(self.root(), &BString::from(""), &mut out);
        out
    }

    fn walk_tree<'a>(&'a self, tree: &'a Tree, prefix: &BString, out: &mut Vec<(BString, &'a TreeRecord)>) {
        for record in tree {
            let mut path = prefix.clone();
            if !path.is_empty() {
                path.push(b'/');
            }
            path.extend_from_slice(&record.name);
            let subtree = if record.kind.is_tree() {
                self.tree(&record.oid)
            } else {
                None
            };
            out.push((path.clone(), record));
            if let Some(subtree) = subtree {
                self.walk_tree(subtree, &path, out);
            }
        }
    }
}

fn build_dir(dir: &Path, config: &HashConfig) -> Result<Built, ObjectError> {
    let children = read_children(dir, config)?;

    let results: Vec<(TreeRecord, Vec<(ObjectId, Tree)>)> = if config.parallel {
        children
            .into_par_iter()
            .map(|child| build_child(child, config))
            .collect::<Result<_, _>>()?
    } else {
        children
            .into_iter()
            .map(|child| build_child(child, config))
            .collect::<Result<_, _>>()?
    };

    let mut trees = Vec::new();
    let mut records = Vec::with_capacity(results.len());
    for (record, subtrees) in results {
        records.push(record);
        trees.extend(subtrees);
    }

    let tree = Tree::from_records(records)?;
    let oid = tree.identifier(config.algorithm)?;
    trace!(path = %dir.display(), oid = %oid.short_hex(), records = tree.len(), "hashed directory");
    trees.push((oid, tree));
    Ok(Built { oid, trees })
}

fn build_child(
    child: Child,
    config: &HashConfig,
) -> Result<(TreeRecord, Vec<(ObjectId, Tree)>), ObjectError> {
    match child.kind {
        ChildKind::File { executable } => {
            let blob = Blob::from_file(config.algorithm, &child.path)?;
            let kind = if executable {
                EntryKind::Executable
            } else {
                EntryKind::Blob
            };
            Ok((TreeRecord::new(child.name, kind, blob.identifier()), Vec::new()))
        }
        ChildKind::Dir => {
            let built = build_dir(&child.path, config)?;
            Ok((TreeRecord::tree(child.name, built.oid), built.trees))
        }
    }
}

fn read_children(dir: &Path, config: &HashConfig) -> Result<Vec<Child>, ObjectError> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err(dir))? {
        let entry = entry.map_err(io_err(dir))?;
        let path = entry.path();
        let name = Vec::from_os_string(entry.file_name()).map_err(|raw| {
            ObjectError::InvalidEntryName {
                name: BString::from(raw.to_string_lossy().as_bytes()),
                reason: "name is not valid UTF-8",
            }
        })?;
        if config.is_ignored(&name) {
            trace!(path = %path.display(), "ignored");
            continue;
        }

        let file_type = entry.file_type().map_err(io_err(&path))?;
        let kind = if file_type.is_dir() {
            ChildKind::Dir
        } else {
            // Symlinks are followed to their target; links to directories
            // are skipped so a cycle cannot recurse forever.
            let meta = match fs::metadata(&path) {
                Ok(meta) => meta,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    trace!(path = %path.display(), "dangling symlink skipped");
                    continue;
                }
                Err(e) => return Err(io_err(&path)(e)),
            };
            if !meta.is_file() {
                trace!(path = %path.display(), "not a regular file, skipped");
                continue;
            }
            ChildKind::File {
                executable: config.detect_executable && is_executable(&meta),
            }
        };

        children.push(Child {
            name: BString::from(name),
            path,
            kind,
        });
    }
    Ok(children)
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ObjectError {
    let path = path.to_path_buf();
    move |source| ObjectError::File { path, source }
}

#[cfg(unix)]
fn is_executable(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &fs::Metadata) -> bool {
    false
}
