//! Canonical byte encoding of object bodies.
//!
//! Every field is framed as a netstring, `<decimal length>:<bytes>,`, so a
//! sequence of fields can only be read back one way. Concatenating raw
//! fields would let `"ab" + "1"` and `"a" + "b1"` collide.

use std::fmt::Display;

use caf_hash::ObjectId;

/// Append-only builder for a canonical object body.
#[derive(Debug, Default)]
pub struct CanonicalWriter {
    buf: Vec<u8>,
}

impl CanonicalWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one length-prefixed field.
    pub fn field(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes.len().to_string().as_bytes());
        self.buf.push(b':');
        self.buf.extend_from_slice(bytes);
        self.buf.push(b',');
        self
    }

    /// Append the decimal rendering of a number or other displayable value.
    pub fn text(&mut self, value: impl Display) -> &mut Self {
        self.field(value.to_string().as_bytes())
    }

    /// Append an identifier in lowercase hex.
    pub fn oid(&mut self, oid: &ObjectId) -> &mut Self {
        self.field(oid.to_hex().as_bytes())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}
