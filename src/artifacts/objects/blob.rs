//! Blob object
//!
//! Blobs store file content verbatim. They carry no metadata, no filename
//! and no permissions; those live in the tree entries pointing at them.

use crate::artifacts::core::error::Result;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Raw file bytes, identified by the hash of their framed representation
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn bytes(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn content(&self) -> Result<Bytes> {
        Ok(self.content.clone())
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> Result<Self> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Self::new(Bytes::from(content)))
    }
}

impl Object for Blob {
    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).to_string()
    }
}
