//! Digest primitive and object identity for the caf content-addressed store.
//!
//! This crate provides the `ObjectId` identifier type, the pluggable
//! `HashAlgorithm` selector, streaming digest computation and the hex
//! encoding used to render identifiers.

mod error;
pub mod hex;
mod algorithm;
mod oid;
pub mod hasher;

pub use algorithm::HashAlgorithm;
pub use error::HashError;
pub use hasher::Hasher;
pub use oid::ObjectId;
