//! Commit object
//!
//! A commit links one tree (the snapshot) to at most one parent commit,
//! stamped with author identity, a timestamp and a message.
//!
//! ## Format
//!
//! ```text
//! tree <tree-hash>
//! parent <parent-hash>        (absent on the first commit)
//! author <name> <email> <time>
//!
//! <message>
//! ```
//!
//! `<time>` is RFC 822 with a numeric zone, e.g. `02 Jan 06 15:04 -0700`.

use crate::artifacts::core::error::{Error, Result};
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// RFC 822 with numeric zone, the only timestamp encoding commits use
pub const TIME_FORMAT: &str = "%d %b %y %H:%M %z";

/// Author identity: a name and an email address
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Author {
    name: String,
    email: String,
}

impl Author {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Format as `Name <email@example.com>`
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// Parse an `author` header value: `name <email> time`
    ///
    /// The name is everything before the first `<`, trimmed; the email sits
    /// between the angle brackets; the rest after `"> "` is the timestamp.
    fn parse_with_timestamp(value: &str) -> Result<(Self, chrono::DateTime<chrono::FixedOffset>)> {
        let email_start = value
            .find('<')
            .ok_or_else(|| Error::BadAuthorLine(value.to_string()))?;
        let email_end = value
            .find('>')
            .ok_or_else(|| Error::BadAuthorLine(value.to_string()))?;
        if email_end < email_start || value.len() < email_end + 2 {
            return Err(Error::BadAuthorLine(value.to_string()));
        }

        let name = value[..email_start].trim().to_string();
        let email = value[email_start + 1..email_end].to_string();

        let raw_time = &value[email_end + 2..];
        let timestamp = chrono::DateTime::parse_from_str(raw_time, TIME_FORMAT)
            .map_err(|_| Error::BadTime(raw_time.to_string()))?;

        Ok((Author::new(name, email), timestamp))
    }
}

/// Snapshot of the repository at one point of the commit DAG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    tree_oid: ObjectId,
    parent: Option<ObjectId>,
    author: Author,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
    message: String,
}

impl Commit {
    /// Create a new commit; `parent` is `None` for the first commit
    pub fn new(
        tree_oid: ObjectId,
        parent: Option<ObjectId>,
        author: Author,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
        message: String,
    ) -> Self {
        Commit {
            tree_oid,
            parent,
            author,
            timestamp,
            message,
        }
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message, for short-form display
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }
}

impl Packable for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn content(&self) -> Result<Bytes> {
        let mut content = format!("tree {}\n", self.tree_oid.as_ref());
        if let Some(parent) = &self.parent {
            content.push_str(&format!("parent {}\n", parent.as_ref()));
        }
        content.push_str(&format!(
            "author {} {}\n",
            self.author.display_name(),
            self.timestamp.format(TIME_FORMAT)
        ));
        content.push('\n');
        content.push_str(&format!("{}\n", self.message));

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> Result<Self> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;

        let raw = String::from_utf8(raw)
            .map_err(|_| Error::CorruptObject("commit content is not valid utf-8".to_string()))?;

        let mut tree_oid = None;
        let mut parent = None;
        let mut author_and_time = None;
        let mut message_lines = Vec::new();
        let mut in_message = false;

        for line in raw.lines() {
            if in_message {
                message_lines.push(line);
                continue;
            }
            if line.is_empty() {
                in_message = true;
                continue;
            }

            // header lines that don't split into key and value are ignored,
            // as are unknown keys
            let Some((key, value)) = line.split_once(' ') else {
                continue;
            };
            match key {
                "tree" => {
                    tree_oid = Some(
                        ObjectId::try_parse(value.to_string())
                            .map_err(|_| Error::BadCommitHeader(line.to_string()))?,
                    );
                }
                "parent" => {
                    parent = Some(
                        ObjectId::try_parse(value.to_string())
                            .map_err(|_| Error::BadCommitHeader(line.to_string()))?,
                    );
                }
                "author" => {
                    author_and_time = Some(Author::parse_with_timestamp(value)?);
                }
                _ => {}
            }
        }

        let tree_oid =
            tree_oid.ok_or_else(|| Error::BadCommitHeader("missing tree header".to_string()))?;
        let (author, timestamp) = author_and_time
            .ok_or_else(|| Error::BadCommitHeader("missing author header".to_string()))?;
        let message = message_lines.join("\n");

        Ok(Self::new(tree_oid, parent, author, timestamp, message))
    }
}

impl Object for Commit {
    fn display(&self) -> String {
        self.content()
            .map(|content| String::from_utf8_lossy(&content).to_string())
            .unwrap_or_default()
    }
}
