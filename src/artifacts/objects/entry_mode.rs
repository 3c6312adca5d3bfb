use crate::artifacts::core::error::Error;
use crate::artifacts::objects::object_type::ObjectType;

/// POSIX-style mode string recorded in a tree entry.
///
/// The builder only produces `Regular` and `Directory`; `Executable` and
/// `Symlink` are reserved and accepted by the parser but never emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryMode {
    #[default]
    Regular,
    Executable,
    Symlink,
    Directory,
}

impl EntryMode {
    pub fn as_str(&self) -> &str {
        match self {
            EntryMode::Regular => "100644",
            EntryMode::Executable => "100755",
            EntryMode::Symlink => "120000",
            EntryMode::Directory => "040000",
        }
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            EntryMode::Regular | EntryMode::Executable | EntryMode::Symlink => ObjectType::Blob,
            EntryMode::Directory => ObjectType::Tree,
        }
    }
}

impl TryFrom<&str> for EntryMode {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Error> {
        match value {
            "100644" => Ok(EntryMode::Regular),
            "100755" => Ok(EntryMode::Executable),
            "120000" => Ok(EntryMode::Symlink),
            "040000" => Ok(EntryMode::Directory),
            _ => Err(Error::BadTreeEntry(format!("unknown entry mode '{value}'"))),
        }
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
