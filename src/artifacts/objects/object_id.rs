//! Object identifier (SHA-1 hash)
//!
//! Object ids are 40-character lowercase hexadecimal strings computed over an
//! object's framed byte representation. They are the only identity objects
//! have: two objects with the same framed bytes share an id.
//!
//! On disk an object lives at `objects/<first-2-chars>/<remaining-38-chars>`.

use crate::artifacts::core::error::{Error, Result};
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object id from a string.
    ///
    /// Fails with `BadHashLength` unless the input is exactly 40 characters,
    /// and with `CorruptObject` if any character is not a lowercase hex
    /// digit. Hashes are always produced lowercase, so uppercase input could
    /// never address a stored object and is rejected as malformed.
    pub fn try_parse(id: String) -> Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(Error::BadHashLength(id.len()));
        }
        if !id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')) {
            return Err(Error::CorruptObject(format!(
                "invalid object id characters: {id}"
            )));
        }
        Ok(Self(id))
    }

    /// Split the hash into the storage directory and file name,
    /// `abc123...` becoming `("ab", "c123...")`.
    pub fn split(&self) -> (&str, &str) {
        self.0.split_at(2)
    }

    /// Relative path of the object file inside the objects directory.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.split();
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters, for short-form display.
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
