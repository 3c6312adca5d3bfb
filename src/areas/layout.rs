//! Repository path layout
//!
//! Locates the repository root and computes paths inside the repository
//! directory. The root is found once, at entry, by walking from the working
//! directory toward the filesystem root; every other component receives its
//! paths from the resolved [`Layout`] instead of re-locating per call.

use crate::artifacts::core::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Name of the repository directory
pub const GIT_DIR: &str = ".gggit";

/// Resolved repository root
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// Locate the repository by walking up from the current working directory
    pub fn discover() -> Result<Self> {
        Self::discover_from(&std::env::current_dir()?)
    }

    /// Locate the repository by walking up from `start`
    ///
    /// Returns the first ancestor containing a `.gggit` directory, or
    /// `NotARepository` after reaching the filesystem root.
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut dir = start.to_path_buf();

        loop {
            if dir.join(GIT_DIR).is_dir() {
                return Ok(Layout { root: dir });
            }
            if !dir.pop() {
                return Err(Error::NotARepository);
            }
        }
    }

    /// Use `root` as the repository root without searching
    ///
    /// The repository directory does not have to exist yet; `init` relies
    /// on that to create it.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Layout { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the repository directory
    pub fn git_dir(&self) -> PathBuf {
        self.root.join(GIT_DIR)
    }

    /// Absolute path of a directory inside the repository directory
    ///
    /// Fails with `SubdirMissing` when the directory is absent.
    pub fn git_subdir(&self, name: &str) -> Result<PathBuf> {
        let subdir = self.git_dir().join(name);

        if subdir.is_dir() {
            Ok(subdir)
        } else {
            Err(Error::SubdirMissing(name.to_string()))
        }
    }

    /// Absolute path of a file inside the repository directory
    pub fn git_file(&self, name: &str) -> PathBuf {
        self.git_dir().join(name)
    }
}
