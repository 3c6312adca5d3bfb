//! Object database
//!
//! Content-addressable storage for all repository objects (blobs, trees,
//! commits). Objects are identified by the SHA-1 of their framed bytes and
//! stored zlib-compressed under a two-level directory layout.
//!
//! ## Storage format
//!
//! - Path: `.gggit/objects/45/b983...` (first 2 hash chars as directory,
//!   remaining 38 as file name)
//! - Content: `zlib("{type} {len}\0{bytes}")`
//!
//! Objects are immutable and append-only: a stored file is never rewritten.
//! Two processes racing to write the same object write identical bytes under
//! the same path, so the store needs no locking; new files appear via a
//! temp-file + rename.

use crate::artifacts::core::error::{Error, Result};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;
use log::debug;
use sha1::{Digest, Sha1};
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    /// Path to the objects directory (`.gggit/objects`)
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store an object
    ///
    /// Frames and hashes the object, then writes the compressed bytes under
    /// the hash-derived path. If the object file already exists this is a
    /// no-op: same hash, same content.
    ///
    /// Fails with `EmptyObject` for an object that serializes to no content
    /// and is not a blob (empty blobs are legal and hash to a fixed id).
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        let content = object.content()?;
        if content.is_empty() && object.object_type() != ObjectType::Blob {
            return Err(Error::EmptyObject(object.object_type().to_string()));
        }

        let framed = object.serialize()?;
        let oid = Self::hash_framed(&framed)?;
        let object_path = self.path.join(oid.to_path());

        if object_path.exists() {
            return Ok(oid);
        }

        std::fs::create_dir_all(object_path.parent().ok_or_else(|| {
            Error::CorruptObject(format!("invalid object path {}", object_path.display()))
        })?)?;
        self.write_object(object_path, framed)?;
        debug!("stored {} object {}", object.object_type(), oid);

        Ok(oid)
    }

    /// Compute an object's id without touching the store
    pub fn calculate_hash(object: &impl Object) -> Result<ObjectId> {
        Self::hash_framed(&object.serialize()?)
    }

    /// Parse the object identified by `oid` into its concrete type
    ///
    /// For trees, every referenced child must already exist in the store;
    /// a dangling entry surfaces as `ObjectNotFound`.
    pub fn parse_object(&self, oid: &ObjectId) -> Result<ObjectBox> {
        let framed = self.load(oid)?;
        let (object_type, content) = Self::split_framed(&framed)?;
        let reader = Cursor::new(content);

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Blob::deserialize(reader)?)),
            ObjectType::Tree => {
                let tree = Tree::deserialize(reader)?;
                self.verify_children(&tree)?;
                Ok(ObjectBox::Tree(tree))
            }
            ObjectType::Commit => Ok(ObjectBox::Commit(Commit::deserialize(reader)?)),
        }
    }

    /// Parse an object as a commit, returning `None` if it is something else
    pub fn parse_object_as_commit(&self, oid: &ObjectId) -> Result<Option<Commit>> {
        match self.parse_object(oid)? {
            ObjectBox::Commit(commit) => Ok(Some(commit)),
            _ => Ok(None),
        }
    }

    /// Parse an object as a tree, returning `None` if it is something else
    pub fn parse_object_as_tree(&self, oid: &ObjectId) -> Result<Option<Tree>> {
        match self.parse_object(oid)? {
            ObjectBox::Tree(tree) => Ok(Some(tree)),
            _ => Ok(None),
        }
    }

    /// Whether the object file is present, without decoding it
    pub fn exists(&self, oid: &ObjectId) -> bool {
        self.path.join(oid.to_path()).exists()
    }

    /// Write the object's raw content bytes (header stripped) to `writer`
    ///
    /// Tree and commit content is human-readable text; blob content is
    /// emitted verbatim.
    pub fn print_object(&self, oid: &ObjectId, writer: &mut dyn Write) -> Result<()> {
        let framed = self.load(oid)?;
        let (_, content) = Self::split_framed(&framed)?;

        writer.write_all(content)?;
        Ok(())
    }

    /// Every object id currently in the store, sorted
    pub fn list_object_ids(&self) -> Result<Vec<ObjectId>> {
        let mut oids = walkdir::WalkDir::new(&self.path)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let subdir = entry.path().parent()?.file_name()?.to_str()?.to_string();
                let file = entry.file_name().to_str()?;
                ObjectId::try_parse(format!("{subdir}{file}")).ok()
            })
            .collect::<Vec<_>>();
        oids.sort();

        Ok(oids)
    }

    /// Load the decompressed framed bytes of a stored object
    fn load(&self, oid: &ObjectId) -> Result<Bytes> {
        let object_path = self.path.join(oid.to_path());

        let compressed = std::fs::read(&object_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ObjectNotFound(oid.to_string())
            } else {
                Error::Io(e)
            }
        })?;

        Self::decompress(compressed.into())
    }

    /// Split framed bytes into the parsed header and the content slice
    ///
    /// The declared content length must match the actual length; a mismatch
    /// means the object bytes are corrupt.
    fn split_framed(framed: &[u8]) -> Result<(ObjectType, &[u8])> {
        let nul_pos = framed
            .iter()
            .position(|&byte| byte == 0)
            .ok_or_else(|| Error::CorruptObject("no NUL byte after header".to_string()))?;

        let header = std::str::from_utf8(&framed[..nul_pos])
            .map_err(|_| Error::CorruptObject("header is not valid utf-8".to_string()))?;
        let (type_tag, declared_len) = header
            .split_once(' ')
            .ok_or_else(|| Error::CorruptObject(format!("invalid header '{header}'")))?;

        let object_type = ObjectType::try_from(type_tag)?;
        let declared_len = declared_len
            .parse::<usize>()
            .map_err(|_| Error::CorruptObject(format!("invalid content length '{declared_len}'")))?;

        let content = &framed[nul_pos + 1..];
        if content.len() != declared_len {
            return Err(Error::CorruptObject(format!(
                "declared length {declared_len} does not match actual length {}",
                content.len()
            )));
        }

        Ok((object_type, content))
    }

    fn verify_children(&self, tree: &Tree) -> Result<()> {
        for entry in tree.entries() {
            if !self.exists(entry.oid()) {
                return Err(Error::ObjectNotFound(entry.oid().to_string()));
            }
        }

        Ok(())
    }

    fn hash_framed(framed: &Bytes) -> Result<ObjectId> {
        let mut hasher = Sha1::new();
        hasher.update(framed);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }

    fn write_object(&self, object_path: PathBuf, framed: Bytes) -> Result<()> {
        let object_dir = object_path.parent().ok_or_else(|| {
            Error::CorruptObject(format!("invalid object path {}", object_path.display()))
        })?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let compressed = Self::compress(framed)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)?;
        file.write_all(&compressed)?;
        drop(file);

        // rename the temp file into place so readers never observe a
        // partially written object
        std::fs::rename(&temp_object_path, &object_path)?;

        Ok(())
    }

    fn compress(data: Bytes) -> Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&data)?;

        Ok(encoder.finish()?.into())
    }

    fn decompress(data: Bytes) -> Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| Error::CorruptObject(format!("unable to decompress object: {e}")))?;

        Ok(decompressed.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
