//! Repository facade
//!
//! Resolves the repository location once and threads it through the
//! lower-level components (database, workspace, refs). All commands are
//! implemented as methods on [`Repository`] in `crate::commands`, writing
//! their output through the injected writer.

use crate::areas::database::Database;
use crate::areas::layout::Layout;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::config::{AuthorProvider, Clock, EnvAuthorProvider, SystemClock};
use crate::artifacts::core::error::Result;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Object database directory name inside the repository directory
const DATABASE_DIR: &str = "objects";

pub struct Repository {
    /// Resolved repository location
    layout: Layout,
    /// Output writer (stdout in the CLI, a buffer in tests)
    writer: RefCell<Box<dyn std::io::Write>>,
    /// Object database
    database: Database,
    /// Working directory
    workspace: Workspace,
    /// Reference manager
    refs: Refs,
    /// Source of commit author identity
    author_provider: Box<dyn AuthorProvider>,
    /// Source of commit timestamps
    clock: Box<dyn Clock>,
}

impl Repository {
    /// Open the repository containing the current working directory
    pub fn discover(writer: Box<dyn std::io::Write>) -> Result<Self> {
        Ok(Self::from_layout(Layout::discover()?, writer))
    }

    /// Open a repository-to-be at `path` without requiring `.gggit` to exist
    ///
    /// Used by `init`, which creates the skeleton afterwards. The path itself
    /// must exist.
    pub fn init_at(path: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let root = path.canonicalize()?;
        Ok(Self::from_layout(Layout::at(root), writer))
    }

    fn from_layout(layout: Layout, writer: Box<dyn std::io::Write>) -> Self {
        let database = Database::new(layout.git_file(DATABASE_DIR).into_boxed_path());
        let workspace = Workspace::new(layout.root().to_path_buf().into_boxed_path());
        let refs = Refs::new(layout.git_dir().into_boxed_path());

        Repository {
            layout,
            writer: RefCell::new(writer),
            database,
            workspace,
            refs,
            author_provider: Box::new(EnvAuthorProvider),
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the author source (tests stub identity through this)
    pub fn with_author_provider(mut self, provider: Box<dyn AuthorProvider>) -> Self {
        self.author_provider = provider;
        self
    }

    /// Replace the clock (tests stub time through this)
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Assemble a commit from the injected author and clock
    ///
    /// `parent` is `None` for the first commit on a branch. The message is
    /// stored trimmed; serialization appends the final line feed.
    pub fn new_commit(
        &self,
        tree_oid: ObjectId,
        parent: Option<ObjectId>,
        message: &str,
    ) -> Result<Commit> {
        let author = self.author_provider.lookup()?;
        let timestamp = self.clock.now();

        Ok(Commit::new(
            tree_oid,
            parent,
            author,
            timestamp,
            message.trim().to_string(),
        ))
    }
}
