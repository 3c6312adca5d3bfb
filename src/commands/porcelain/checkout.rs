use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::Error;
use std::io::Write;

impl Repository {
    /// Attach HEAD to an existing branch
    ///
    /// The working directory is left untouched; only the HEAD pointer moves.
    pub fn checkout(&mut self, name: &str) -> anyhow::Result<()> {
        let name = BranchName::try_parse(name.to_string())?;

        if !self.refs().exists(&name) {
            anyhow::bail!("ref {name} does not exist");
        }

        self.refs().point_head_at_branch(&name)?;

        match self.refs().read_branch_hash(&name) {
            Ok(oid) => writeln!(self.writer(), "on branch {name} (commit {oid})")?,
            Err(Error::BranchWithoutHash) => {
                writeln!(self.writer(), "on branch {name} (no commits yet)")?
            }
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }
}
