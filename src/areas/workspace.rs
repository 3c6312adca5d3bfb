//! Working directory access and the tree builder
//!
//! The workspace reads files and directories from the working tree and turns
//! a directory into a tree object plus the blobs and sub-trees it references.
//!
//! ## Tree building
//!
//! `hash_tree` walks one directory level, recursing into subdirectories.
//! Entries are emitted sorted by name so the resulting hashes do not depend
//! on the platform's directory listing order. The repository directory is
//! skipped, and a directory that would produce an empty tree is elided from
//! its parent; only at the root does `EmptyTree` surface to the caller.

use crate::areas::database::Database;
use crate::areas::layout::GIT_DIR;
use crate::artifacts::core::error::{Error, Result};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use bytes::Bytes;
use derive_new::new;
use log::debug;
use std::path::Path;

/// Working directory rooted at the repository root
#[derive(Debug, new)]
pub struct Workspace {
    path: Box<Path>,
}

/// In-memory snapshot of one directory level, kept only while building
/// and persisting; the stored tree itself stays shallow
#[derive(Debug)]
struct DirectorySnapshot {
    tree: Tree,
    children: Vec<ChildSnapshot>,
}

#[derive(Debug)]
enum ChildSnapshot {
    Blob(Blob),
    Tree(DirectorySnapshot),
}

impl DirectorySnapshot {
    /// Persist the snapshot: the tree itself first, then every child whose
    /// hash is not already in the store, recursing into sub-trees
    fn persist(&self, database: &Database) -> Result<()> {
        database.store(&self.tree)?;

        for (entry, child) in self.tree.entries().zip(&self.children) {
            if database.exists(entry.oid()) {
                continue;
            }
            match child {
                ChildSnapshot::Blob(blob) => {
                    database.store(blob)?;
                }
                ChildSnapshot::Tree(subtree) => {
                    subtree.persist(database)?;
                }
            }
        }

        Ok(())
    }
}

impl Workspace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a file's bytes; relative paths resolve against the workspace root
    pub fn read_file(&self, file_path: &Path) -> Result<Bytes> {
        let file_path = self.path.join(file_path);
        Ok(Bytes::from(std::fs::read(file_path)?))
    }

    /// Wrap a file's bytes as a blob
    pub fn parse_blob(&self, file_path: &Path) -> Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    /// Build the tree for `path`, optionally persisting it and every object
    /// it references, and return the outer tree's hash
    pub fn hash_tree(&self, path: &Path, write: bool, database: &Database) -> Result<ObjectId> {
        let snapshot = self.snapshot_directory(path)?;

        if write {
            snapshot.persist(database)?;
        }

        let oid = snapshot.tree.object_id()?;
        debug!("hashed tree {} for {}", oid, path.display());

        Ok(oid)
    }

    fn snapshot_directory(&self, dir: &Path) -> Result<DirectorySnapshot> {
        if !dir.is_dir() {
            return Err(Error::NotADirectory(dir.to_path_buf()));
        }

        let mut dir_entries = std::fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
        if dir_entries.is_empty() {
            return Err(Error::EmptyTree);
        }
        // sort by name for reproducible hashes across platforms
        dir_entries.sort_by_key(|entry| entry.file_name());

        let mut entries = Vec::new();
        let mut children = Vec::new();

        for dir_entry in dir_entries {
            let name = dir_entry.file_name().to_string_lossy().to_string();
            let entry_path = dir_entry.path();

            if dir_entry.file_type()?.is_dir() {
                if name == GIT_DIR {
                    continue;
                }
                match self.snapshot_directory(&entry_path) {
                    // a subdirectory without recordable entries is elided
                    Err(Error::EmptyTree) => continue,
                    Err(e) => return Err(e),
                    Ok(child) => {
                        let oid = child.tree.object_id()?;
                        entries.push(TreeEntry::new(
                            EntryMode::Directory,
                            ObjectType::Tree,
                            oid,
                            name,
                        ));
                        children.push(ChildSnapshot::Tree(child));
                    }
                }
            } else {
                let blob = self.parse_blob(&entry_path)?;
                let oid = blob.object_id()?;
                entries.push(TreeEntry::new(
                    EntryMode::Regular,
                    ObjectType::Blob,
                    oid,
                    name,
                ));
                children.push(ChildSnapshot::Blob(blob));
            }
        }

        if entries.is_empty() {
            return Err(Error::EmptyTree);
        }

        Ok(DirectorySnapshot {
            tree: Tree::new(entries),
            children,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_workspace() -> (assert_fs::TempDir, Workspace, Database) {
        let dir = assert_fs::TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());
        let database = Database::new(dir.path().join("objects-db").into_boxed_path());
        std::fs::create_dir_all(database.objects_path()).unwrap();
        (dir, workspace, database)
    }

    fn write_file(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn hashes_a_single_file_directory() {
        let (dir, workspace, database) = temp_workspace();
        write_file(dir.path(), "project/foo", "hi\n");

        let oid = workspace
            .hash_tree(&dir.path().join("project"), false, &database)
            .unwrap();

        let expected = Tree::new(vec![TreeEntry::new(
            EntryMode::Regular,
            ObjectType::Blob,
            ObjectId::try_parse("45b983be36b73c0788dc9cbcb76cbb80fc7bb057".to_string()).unwrap(),
            "foo".to_string(),
        )]);
        assert_eq!(oid, expected.object_id().unwrap());
    }

    #[test]
    fn entries_are_sorted_by_name() {
        let (dir, workspace, database) = temp_workspace();
        // create in reverse order; listing order must not leak into the tree
        write_file(dir.path(), "project/zeta.txt", "z");
        write_file(dir.path(), "project/alpha.txt", "a");

        let oid = workspace
            .hash_tree(&dir.path().join("project"), true, &database)
            .unwrap();

        let tree = database.parse_object_as_tree(&oid).unwrap().unwrap();
        let names = tree.entries().map(|e| e.name().to_string()).collect::<Vec<_>>();
        assert_eq!(names, vec!["alpha.txt", "zeta.txt"]);
    }

    #[test]
    fn skips_the_repository_directory() {
        let (dir, workspace, database) = temp_workspace();
        write_file(dir.path(), "project/foo", "hi\n");
        write_file(dir.path(), &format!("project/{GIT_DIR}/HEAD"), "ref: refs/heads/master");

        let oid = workspace
            .hash_tree(&dir.path().join("project"), true, &database)
            .unwrap();

        let tree = database.parse_object_as_tree(&oid).unwrap().unwrap();
        assert_eq!(tree.entries().count(), 1);
        assert_eq!(tree.entries().next().unwrap().name(), "foo");
    }

    #[test]
    fn elides_empty_subdirectories() {
        let (dir, workspace, database) = temp_workspace();
        write_file(dir.path(), "project/foo", "hi\n");
        std::fs::create_dir_all(dir.path().join("project").join("empty")).unwrap();

        let oid = workspace
            .hash_tree(&dir.path().join("project"), true, &database)
            .unwrap();

        let tree = database.parse_object_as_tree(&oid).unwrap().unwrap();
        assert_eq!(tree.entries().count(), 1);
    }

    #[test]
    fn empty_root_directory_fails() {
        let (dir, workspace, database) = temp_workspace();
        std::fs::create_dir_all(dir.path().join("project")).unwrap();

        assert!(matches!(
            workspace.hash_tree(&dir.path().join("project"), false, &database),
            Err(Error::EmptyTree)
        ));
    }

    #[test]
    fn directory_holding_only_the_repository_directory_fails() {
        let (dir, workspace, database) = temp_workspace();
        write_file(dir.path(), &format!("project/{GIT_DIR}/HEAD"), "ref: refs/heads/master");

        assert!(matches!(
            workspace.hash_tree(&dir.path().join("project"), false, &database),
            Err(Error::EmptyTree)
        ));
    }

    #[test]
    fn a_file_path_is_not_a_tree() {
        let (dir, workspace, database) = temp_workspace();
        write_file(dir.path(), "plain.txt", "content");

        assert!(matches!(
            workspace.hash_tree(&dir.path().join("plain.txt"), false, &database),
            Err(Error::NotADirectory(_))
        ));
    }

    #[test]
    fn writing_persists_the_referential_closure() {
        let (dir, workspace, database) = temp_workspace();
        write_file(dir.path(), "project/1.txt", "one");
        write_file(dir.path(), "project/a/2.txt", "two");
        write_file(dir.path(), "project/a/b/3.txt", "three");

        let root_oid = workspace
            .hash_tree(&dir.path().join("project"), true, &database)
            .unwrap();

        // parse_object verifies child existence for every tree it loads
        let mut pending = vec![root_oid];
        while let Some(oid) = pending.pop() {
            if let Some(tree) = database.parse_object_as_tree(&oid).unwrap() {
                for entry in tree.entries() {
                    assert!(database.exists(entry.oid()));
                    if entry.object_type() == ObjectType::Tree {
                        pending.push(entry.oid().clone());
                    }
                }
            }
        }
    }

    #[test]
    fn hashing_is_deterministic() {
        let (dir, workspace, database) = temp_workspace();
        write_file(dir.path(), "project/1.txt", "one");
        write_file(dir.path(), "project/a/2.txt", "two");

        let first = workspace
            .hash_tree(&dir.path().join("project"), false, &database)
            .unwrap();
        let second = workspace
            .hash_tree(&dir.path().join("project"), true, &database)
            .unwrap();

        assert_eq!(first, second);
    }
}
