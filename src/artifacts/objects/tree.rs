//! Tree object
//!
//! Trees record one directory level as an ordered list of entries. Each
//! entry is a single path component pointing at a blob (file) or another
//! tree (subdirectory).
//!
//! ## Format
//!
//! One text line per entry:
//! ```text
//! <mode> <type> <hash>\t<name>\n
//! ```
//! This is deliberately not the binary format standard Git uses; hashes are
//! stored as 40-char hex and entries are newline-separated. Compatibility
//! with standard Git tooling is not a goal.
//!
//! ## Representation
//!
//! Entries are shallow: they carry `(mode, type, hash, name)` only. Children
//! are loaded on demand through the database, so deep trees never pull the
//! whole subgraph into memory.

use crate::artifacts::core::error::{Error, Result};
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

/// One directory member: mode, type tag, child hash and path component
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    mode: EntryMode,
    object_type: ObjectType,
    oid: ObjectId,
    name: String,
}

impl TreeEntry {
    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn encode(&self) -> String {
        format!(
            "{} {} {}\t{}\n",
            self.mode.as_str(),
            self.object_type.as_str(),
            self.oid.as_ref(),
            self.name
        )
    }

    fn decode(line: &str) -> Result<Self> {
        let (head, name) = line
            .split_once('\t')
            .ok_or_else(|| Error::BadTreeEntry(line.to_string()))?;

        let mut fields = head.splitn(3, ' ');
        let mode = fields
            .next()
            .ok_or_else(|| Error::BadTreeEntry(line.to_string()))?;
        let object_type = fields
            .next()
            .ok_or_else(|| Error::BadTreeEntry(line.to_string()))?;
        let oid = fields
            .next()
            .ok_or_else(|| Error::BadTreeEntry(line.to_string()))?;

        if name.is_empty() || oid.len() != crate::artifacts::objects::OBJECT_ID_LENGTH {
            return Err(Error::BadTreeEntry(line.to_string()));
        }

        let mode = EntryMode::try_from(mode)?;
        let object_type = ObjectType::try_from(object_type)
            .map_err(|_| Error::BadTreeEntry(line.to_string()))?;
        let oid = ObjectId::try_parse(oid.to_string())
            .map_err(|_| Error::BadTreeEntry(line.to_string()))?;

        Ok(Self::new(mode, object_type, oid, name.to_string()))
    }
}

/// Ordered directory snapshot
///
/// Entry order is fixed by the producer: the tree builder emits entries
/// sorted by name so hashes are reproducible across platforms, and the
/// parser preserves whatever order is on disk.
#[derive(Debug, Clone, PartialEq, Eq, Default, new)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn content(&self) -> Result<Bytes> {
        let mut content = Vec::new();
        for entry in &self.entries {
            content.write_all(entry.encode().as_bytes())?;
        }

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Tree {
    fn deserialize(mut reader: impl BufRead) -> Result<Self> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        let content = String::from_utf8(content)
            .map_err(|_| Error::CorruptObject("tree content is not valid utf-8".to_string()))?;

        let entries = content
            .lines()
            .filter(|line| !line.is_empty())
            .map(TreeEntry::decode)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(entries))
    }
}

impl Object for Tree {
    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.encode())
            .collect::<String>()
    }
}
