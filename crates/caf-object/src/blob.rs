use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use caf_hash::{HashAlgorithm, Hasher, ObjectId};

use crate::ObjectError;

/// A blob: the identity of raw file content.
///
/// The identifier is the plain digest of the content, computed once when the
/// blob is created. Content itself is not retained or interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Blob {
    oid: ObjectId,
}

impl Blob {
    /// Wrap an identifier that was computed elsewhere.
    pub fn new(oid: ObjectId) -> Self {
        Self { oid }
    }

    /// Digest in-memory content.
    pub fn from_bytes(algo: HashAlgorithm, data: &[u8]) -> Result<Self, ObjectError> {
        Ok(Self::new(Hasher::digest(algo, data)?))
    }

    /// Digest everything `reader` yields, without buffering it whole.
    pub fn from_reader<R: Read>(algo: HashAlgorithm, mut reader: R) -> Result<Self, ObjectError> {
        let mut hasher = Hasher::new(algo);
        io::copy(&mut reader, &mut hasher)?;
        Ok(Self::new(hasher.finalize()?))
    }

    /// Digest the content of the file at `path`.
    pub fn from_file(algo: HashAlgorithm, path: &Path) -> Result<Self, ObjectError> {
        let file_err = |source| ObjectError::File {
            path: path.to_path_buf(),
            source,
        };
        let mut file = File::open(path).map_err(file_err)?;
        let mut hasher = Hasher::new(algo);
        io::copy(&mut file, &mut hasher).map_err(file_err)?;
        Ok(Self::new(hasher.finalize()?))
    }

    /// The blob's identifier. This is an accessor; nothing is re-derived.
    pub fn identifier(&self) -> ObjectId {
        self.oid
    }
}
