use crate::areas::repository::Repository;
use crate::artifacts::core::error::Error;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Report where HEAD points
    ///
    /// Detached HEAD is a normal state here, not a failure.
    pub fn status(&mut self) -> anyhow::Result<()> {
        match self.refs().current_branch() {
            Ok(branch) => match self.refs().head_commit_hash()? {
                Some(oid) => writeln!(self.writer(), "On branch {branch} (commit {oid})")?,
                None => writeln!(self.writer(), "On branch {branch} (no commits yet)")?,
            },
            Err(Error::DetachedHead) => {
                let oid = self
                    .refs()
                    .head_commit_hash()?
                    .context("HEAD is detached but holds no commit")?;
                writeln!(self.writer(), "detached HEAD mode on {oid}")?;
            }
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }
}
