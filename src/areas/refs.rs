//! References (branches and HEAD)
//!
//! References are the mutable edge of the repository: branch files under
//! `refs/heads/` hold a commit hash plus a line feed, and the HEAD file
//! points either at a branch (attached) or directly at a commit (detached).
//!
//! ## HEAD states
//!
//! ```text
//! ┌───────────┐  write "ref: refs/heads/B"   ┌─────────────┐
//! │ Detached  │ ───────────────────────────► │  Attached   │
//! │  at hash  │ ◄─────────────────────────── │  at branch  │
//! └───────────┘    write "{hash}\n"          └─────────────┘
//! ```
//!
//! Ref and HEAD files are overwritten through a sibling temp file and a
//! rename, so a reader never observes a half-written pointer.

use crate::areas::database::Database;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::{Error, Result};
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use log::debug;
use std::path::{Path, PathBuf};

/// Name of the HEAD file
pub const HEAD_REF_NAME: &str = "HEAD";

/// Pattern of an attached HEAD after the trailing line feed is trimmed
const ATTACHED_HEAD_REGEX: &str = r"^ref: refs/(heads|tags|remotes)/([A-Za-z0-9\-_]+)$";

/// Shortest well-formed HEAD content; anything shorter is corrupt
const MIN_HEAD_CONTENT: &str = "ref: refs/heads/a\n";

/// Parsed HEAD pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// HEAD names a branch; the next commit advances that branch
    Attached { branch: BranchName },
    /// HEAD holds a commit hash directly
    Detached { oid: ObjectId },
}

/// Reference manager rooted at the repository directory (`.gggit`)
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    /// Read and parse the HEAD file
    pub fn read_head(&self) -> Result<Head> {
        let content = std::fs::read_to_string(self.head_path())?;
        Self::parse_head(&content)
    }

    /// Parse HEAD content into its attached or detached form
    ///
    /// Content shorter than `"ref: refs/heads/a\n"` is rejected outright.
    /// After trimming a single trailing line feed, a symbolic ref line is
    /// attached mode; anything else must be a commit hash.
    fn parse_head(content: &str) -> Result<Head> {
        if content.len() < MIN_HEAD_CONTENT.len() {
            return Err(Error::CorruptRef(format!(
                "HEAD content '{content}' is too short"
            )));
        }

        let content = content.strip_suffix('\n').unwrap_or(content);

        let re = regex::Regex::new(ATTACHED_HEAD_REGEX)
            .expect("attached HEAD pattern is a valid regex");
        if let Some(captures) = re.captures(content) {
            let branch = BranchName::try_parse(captures[2].to_string())?;
            return Ok(Head::Attached { branch });
        }

        match ObjectId::try_parse(content.to_string()) {
            Ok(oid) => Ok(Head::Detached { oid }),
            Err(_) => Err(Error::CorruptRef(format!(
                "HEAD content '{content}' is neither a symbolic ref nor a hash"
            ))),
        }
    }

    /// Name of the branch HEAD is attached to
    pub fn current_branch(&self) -> Result<BranchName> {
        match self.read_head()? {
            Head::Attached { branch } => Ok(branch),
            Head::Detached { .. } => Err(Error::DetachedHead),
        }
    }

    /// Follow HEAD to a commit hash
    ///
    /// Returns `None` when HEAD is attached to a branch that has no commits
    /// yet.
    pub fn head_commit_hash(&self) -> Result<Option<ObjectId>> {
        match self.read_head()? {
            Head::Detached { oid } => Ok(Some(oid)),
            Head::Attached { branch } => match self.read_branch_hash(&branch) {
                Ok(oid) => Ok(Some(oid)),
                Err(Error::BranchWithoutHash) => Ok(None),
                Err(e) => Err(e),
            },
        }
    }

    /// Read the head commit and return the tree hash it snapshots
    pub fn head_tree_hash(&self, database: &Database) -> Result<ObjectId> {
        let commit_oid = self.head_commit_hash()?.ok_or(Error::BranchWithoutHash)?;
        let commit = database
            .parse_object_as_commit(&commit_oid)?
            .ok_or_else(|| {
                Error::CorruptRef(format!("HEAD resolves to non-commit object {commit_oid}"))
            })?;

        Ok(commit.tree_oid().clone())
    }

    /// Read the hash a branch points at, trimming the trailing line feed
    ///
    /// An absent (or still empty) ref file means the branch exists without
    /// commits and fails with `BranchWithoutHash`.
    pub fn read_branch_hash(&self, name: &BranchName) -> Result<ObjectId> {
        let ref_path = self.branch_path(name);
        if !ref_path.exists() {
            return Err(Error::BranchWithoutHash);
        }

        let content = std::fs::read_to_string(&ref_path)?;
        if content.is_empty() {
            return Err(Error::BranchWithoutHash);
        }

        let content = content.strip_suffix('\n').unwrap_or(&content);
        ObjectId::try_parse(content.to_string()).map_err(|_| {
            Error::CorruptRef(format!(
                "ref refs/heads/{name} holds '{content}' instead of a hash"
            ))
        })
    }

    /// Create an empty ref file for a branch; the caller writes the hash
    pub fn create_ref(&self, name: &BranchName) -> Result<()> {
        std::fs::create_dir_all(self.heads_path())?;
        std::fs::write(self.branch_path(name), b"")?;

        Ok(())
    }

    /// Point a branch at a commit, creating the ref file if needed
    pub fn point_branch_at(&self, name: &BranchName, oid: &ObjectId) -> Result<()> {
        debug!("pointing refs/heads/{name} at {oid}");
        self.write_ref_file(&self.branch_path(name), &format!("{}\n", oid.as_ref()))
    }

    /// Attach HEAD to a branch
    pub fn point_head_at_branch(&self, name: &BranchName) -> Result<()> {
        debug!("pointing HEAD at refs/heads/{name}");
        self.write_ref_file(&self.head_path(), &format!("ref: refs/heads/{name}"))
    }

    /// Detach HEAD onto a commit
    pub fn point_head_at_commit(&self, oid: &ObjectId) -> Result<()> {
        debug!("detaching HEAD onto {oid}");
        self.write_ref_file(&self.head_path(), &format!("{}\n", oid.as_ref()))
    }

    /// Whether the branch ref file is present
    pub fn exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).exists()
    }

    /// Replace a ref file atomically via a sibling temp file and a rename
    fn write_ref_file(&self, path: &Path, content: &str) -> Result<()> {
        let parent = path.parent().ok_or_else(|| {
            Error::CorruptRef(format!("invalid ref path {}", path.display()))
        })?;
        std::fs::create_dir_all(parent)?;

        let temp_path = parent.join(format!("tmp-ref-{}", rand::random::<u32>()));
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, path)?;

        Ok(())
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    fn branch_path(&self, name: &BranchName) -> PathBuf {
        self.heads_path().join(name.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE_OID: &str = "45b983be36b73c0788dc9cbcb76cbb80fc7bb057";

    fn branch(name: &str) -> BranchName {
        BranchName::try_parse(name.to_string()).unwrap()
    }

    fn temp_refs() -> (assert_fs::TempDir, Refs) {
        let dir = assert_fs::TempDir::new().unwrap();
        let refs = Refs::new(dir.path().to_path_buf().into_boxed_path());
        (dir, refs)
    }

    #[test]
    fn parses_attached_head() {
        let head = Refs::parse_head("ref: refs/heads/master").unwrap();

        assert_eq!(
            head,
            Head::Attached {
                branch: branch("master")
            }
        );
    }

    #[test]
    fn parses_attached_head_with_trailing_line_feed() {
        let head = Refs::parse_head("ref: refs/heads/feature-1\n").unwrap();

        assert_eq!(
            head,
            Head::Attached {
                branch: branch("feature-1")
            }
        );
    }

    #[test]
    fn parses_detached_head() {
        let head = Refs::parse_head(&format!("{SAMPLE_OID}\n")).unwrap();

        assert_eq!(
            head,
            Head::Detached {
                oid: ObjectId::try_parse(SAMPLE_OID.to_string()).unwrap()
            }
        );
    }

    #[test]
    fn rejects_head_content_that_is_too_short() {
        assert!(matches!(
            Refs::parse_head("ref: refs/"),
            Err(Error::CorruptRef(_))
        ));
        assert!(matches!(Refs::parse_head(""), Err(Error::CorruptRef(_))));
    }

    #[test]
    fn rejects_head_content_that_is_neither_ref_nor_hash() {
        assert!(matches!(
            Refs::parse_head("this is definitely not a head pointer"),
            Err(Error::CorruptRef(_))
        ));
    }

    #[test]
    fn points_a_branch_and_reads_it_back() {
        let (_dir, refs) = temp_refs();
        let name = branch("master");
        let oid = ObjectId::try_parse(SAMPLE_OID.to_string()).unwrap();

        refs.point_branch_at(&name, &oid).unwrap();

        assert!(refs.exists(&name));
        assert_eq!(refs.read_branch_hash(&name).unwrap(), oid);
        let on_disk = std::fs::read_to_string(refs.heads_path().join("master")).unwrap();
        assert_eq!(on_disk, format!("{SAMPLE_OID}\n"));
    }

    #[test]
    fn missing_branch_ref_means_branch_without_hash() {
        let (_dir, refs) = temp_refs();

        assert!(matches!(
            refs.read_branch_hash(&branch("master")),
            Err(Error::BranchWithoutHash)
        ));
    }

    #[test]
    fn freshly_created_ref_has_no_hash_yet() {
        let (_dir, refs) = temp_refs();
        let name = branch("feature");

        refs.create_ref(&name).unwrap();

        assert!(refs.exists(&name));
        assert!(matches!(
            refs.read_branch_hash(&name),
            Err(Error::BranchWithoutHash)
        ));
    }

    #[test]
    fn attaching_head_then_reading_it_back() {
        let (_dir, refs) = temp_refs();
        let name = branch("feature");

        refs.point_head_at_branch(&name).unwrap();

        assert_eq!(
            std::fs::read_to_string(refs.head_path()).unwrap(),
            "ref: refs/heads/feature"
        );
        assert_eq!(refs.current_branch().unwrap(), name);
    }

    #[test]
    fn detaching_head_then_reading_it_back() {
        let (_dir, refs) = temp_refs();
        let oid = ObjectId::try_parse(SAMPLE_OID.to_string()).unwrap();

        refs.point_head_at_commit(&oid).unwrap();

        assert!(matches!(
            refs.current_branch(),
            Err(Error::DetachedHead)
        ));
        assert_eq!(refs.head_commit_hash().unwrap(), Some(oid));
    }

    #[test]
    fn head_commit_hash_is_none_for_branch_without_commits() {
        let (_dir, refs) = temp_refs();

        refs.point_head_at_branch(&branch("master")).unwrap();

        assert_eq!(refs.head_commit_hash().unwrap(), None);
    }

    #[test]
    fn head_commit_hash_follows_the_attached_branch() {
        let (_dir, refs) = temp_refs();
        let name = branch("master");
        let oid = ObjectId::try_parse(SAMPLE_OID.to_string()).unwrap();

        refs.point_head_at_branch(&name).unwrap();
        refs.point_branch_at(&name, &oid).unwrap();

        assert_eq!(refs.head_commit_hash().unwrap(), Some(oid));
    }

    #[test]
    fn head_tree_hash_reads_the_head_commit() {
        use crate::artifacts::objects::commit::{Author, Commit};
        use chrono::TimeZone;

        let (dir, refs) = temp_refs();
        let database = Database::new(dir.path().join("objects").into_boxed_path());
        std::fs::create_dir_all(database.objects_path()).unwrap();

        let tree_oid =
            ObjectId::try_parse("9fceb02d0ae598e95dc970b74767f19372d61af8".to_string()).unwrap();
        let commit = Commit::new(
            tree_oid.clone(),
            None,
            Author::new("Jane Doe".to_string(), "jane@example.com".to_string()),
            chrono::FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2026, 8, 1, 12, 0, 0)
                .unwrap(),
            "message".to_string(),
        );
        let commit_oid = database.store(&commit).unwrap();

        let name = branch("master");
        refs.point_head_at_branch(&name).unwrap();
        refs.point_branch_at(&name, &commit_oid).unwrap();

        assert_eq!(refs.head_tree_hash(&database).unwrap(), tree_oid);
    }

    #[test]
    fn head_tree_hash_fails_without_commits() {
        let (dir, refs) = temp_refs();
        let database = Database::new(dir.path().join("objects").into_boxed_path());

        refs.point_head_at_branch(&branch("master")).unwrap();

        assert!(matches!(
            refs.head_tree_hash(&database),
            Err(Error::BranchWithoutHash)
        ));
    }

    #[test]
    fn corrupt_branch_ref_is_reported() {
        let (_dir, refs) = temp_refs();
        let name = branch("master");
        std::fs::create_dir_all(refs.heads_path()).unwrap();
        std::fs::write(refs.heads_path().join("master"), "junk\n").unwrap();

        assert!(matches!(
            refs.read_branch_hash(&name),
            Err(Error::CorruptRef(_))
        ));
    }
}
