//! Core object traits and types
//!
//! The fundamental traits implemented by every object variant:
//! - `Packable`: canonical content bytes and the framed representation
//! - `Unpackable`: deserialization from content bytes (header already consumed)
//! - `Object`: common operations (id computation, display)
//!
//! ## Object format
//!
//! All objects are framed as:
//! ```text
//! <type> <size>\0<content>
//! ```
//! The SHA-1 of the framed bytes is the object's identity; the framed bytes
//! are zlib-compressed and stored under `.gggit/objects/`.

use crate::artifacts::core::error::Result;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Trait for serializing objects into the on-disk framing
pub trait Packable {
    /// Get the object's type tag
    fn object_type(&self) -> ObjectType;

    /// Canonical content bytes (hash-stable encoding, without the header)
    fn content(&self) -> Result<Bytes>;

    /// Serialize the object to its framed representation, header included
    fn serialize(&self) -> Result<Bytes> {
        let content = self.content()?;
        let header = format!("{} {}\0", self.object_type().as_str(), content.len());

        let mut framed = Vec::with_capacity(header.len() + content.len());
        framed.write_all(header.as_bytes())?;
        framed.write_all(&content)?;

        Ok(Bytes::from(framed))
    }
}

/// Trait for deserializing objects from their content bytes
pub trait Unpackable {
    /// Deserialize the object from a reader positioned after the header
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

/// Common object operations
///
/// Implemented by all object variants (Blob, Tree, Commit).
pub trait Object: Packable {
    /// Get a human-readable representation
    fn display(&self) -> String;

    /// Compute the object id: the SHA-1 hash of the framed bytes
    fn object_id(&self) -> Result<ObjectId> {
        let framed = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&framed);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }

    /// Relative path inside the objects directory where this object lands
    fn object_path(&self) -> Result<PathBuf> {
        Ok(self.object_id()?.to_path())
    }
}

/// Tagged container over the closed set of object variants
///
/// Returned by the database when the concrete type is only known after
/// reading the stored header. Adding a variant here forces every parser
/// and dispatch site to be updated.
#[derive(Debug, Clone)]
pub enum ObjectBox {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl Packable for ObjectBox {
    fn object_type(&self) -> ObjectType {
        match self {
            ObjectBox::Blob(blob) => blob.object_type(),
            ObjectBox::Tree(tree) => tree.object_type(),
            ObjectBox::Commit(commit) => commit.object_type(),
        }
    }

    fn content(&self) -> Result<Bytes> {
        match self {
            ObjectBox::Blob(blob) => blob.content(),
            ObjectBox::Tree(tree) => tree.content(),
            ObjectBox::Commit(commit) => commit.content(),
        }
    }
}

impl Object for ObjectBox {
    fn display(&self) -> String {
        match self {
            ObjectBox::Blob(blob) => blob.display(),
            ObjectBox::Tree(tree) => tree.display(),
            ObjectBox::Commit(commit) => commit.display(),
        }
    }
}
