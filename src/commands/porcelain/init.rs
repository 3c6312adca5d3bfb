use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;
use std::io::Write;

const DEFAULT_DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

impl Repository {
    /// Create the on-disk repository skeleton
    ///
    /// The new repository starts attached to `master` with no commits: HEAD
    /// says `ref: refs/heads/master` and no ref file exists yet.
    pub fn init(&mut self) -> anyhow::Result<()> {
        let git_dir = self.layout().git_dir();
        if git_dir.exists() {
            anyhow::bail!(
                "gggit directory already exists at {}",
                self.layout().root().display()
            );
        }

        fs::create_dir_all(git_dir.join("objects"))
            .context("failed to create the objects directory")?;
        fs::create_dir_all(git_dir.join("branches"))
            .context("failed to create the branches directory")?;
        fs::create_dir_all(git_dir.join("refs").join("heads"))
            .context("failed to create refs/heads")?;
        fs::create_dir_all(git_dir.join("refs").join("tags"))
            .context("failed to create refs/tags")?;
        fs::create_dir_all(git_dir.join("refs").join("remotes"))
            .context("failed to create refs/remotes")?;

        fs::write(git_dir.join("HEAD"), "ref: refs/heads/master")
            .context("failed to write the HEAD file")?;
        fs::write(git_dir.join("description"), DEFAULT_DESCRIPTION)
            .context("failed to write the description file")?;

        writeln!(
            self.writer(),
            "Initialized empty gggit repository at {}",
            self.layout().root().display()
        )?;

        Ok(())
    }
}
