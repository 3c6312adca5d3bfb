//! Error taxonomy for repository operations
//!
//! Every component of the core returns this closed error enum, so callers can
//! match on the exact failure kind. The command layer wraps these into
//! `anyhow` errors with user-facing context.
//!
//! Two kinds double as control-flow signals:
//! - `EmptyTree` is caught by the tree builder to elide empty subdirectories
//! - `BranchWithoutHash` is caught by commit creation and read as "no parent"

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No repository directory was found in the cwd or any of its ancestors.
    #[error("not a gggit repository (or any of the parent directories)")]
    NotARepository,

    /// A required directory inside the repository directory is absent.
    #[error("repository subdirectory {0} does not exist")]
    SubdirMissing(String),

    /// An object id string is not exactly 40 characters long.
    #[error("incorrect hash length {0}, expected 40")]
    BadHashLength(usize),

    /// The hash does not resolve to a stored object file.
    #[error("object {0} does not exist")]
    ObjectNotFound(String),

    /// The stored object bytes cannot be decoded.
    #[error("corrupt object: {0}")]
    CorruptObject(String),

    /// HEAD or a branch ref holds content that is neither a symbolic ref
    /// nor a commit hash.
    #[error("corrupt ref: {0}")]
    CorruptRef(String),

    /// Refused to persist an object without content or type.
    #[error("cannot write an empty {0} object")]
    EmptyObject(String),

    /// A directory yielded no recordable entries.
    #[error("cannot create an empty tree")]
    EmptyTree,

    /// The tree builder was pointed at something that is not a directory.
    #[error("cannot create a tree from {}", .0.display())]
    NotADirectory(PathBuf),

    /// HEAD points directly at a commit, but the operation needs a branch.
    #[error("HEAD is detached, no current branch")]
    DetachedHead,

    /// The branch ref file does not exist yet (branch without commits).
    #[error("branch has no commits yet")]
    BranchWithoutHash,

    /// A branch name failed validation.
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    /// A persisted tree line does not match `"{mode} {type} {hash}\t{name}"`.
    #[error("malformed tree entry: {0}")]
    BadTreeEntry(String),

    /// A persisted commit is missing or mangling a header line.
    #[error("malformed commit header: {0}")]
    BadCommitHeader(String),

    /// An author value is missing its `<email>` delimiters.
    #[error("malformed author line: {0}")]
    BadAuthorLine(String),

    /// A commit timestamp does not parse as RFC 822 with numeric zone.
    #[error("malformed timestamp: {0}")]
    BadTime(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
