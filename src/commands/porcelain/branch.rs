use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Create a branch pointing at the current head commit
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        let name = BranchName::try_parse(name.to_string())?;

        if self.refs().exists(&name) {
            anyhow::bail!("branch named '{name}' already exists");
        }

        let oid = self
            .refs()
            .head_commit_hash()?
            .context("could not get head commit hash")?;

        self.refs().create_ref(&name)?;
        self.refs().point_branch_at(&name, &oid)?;

        writeln!(self.writer(), "created a new branch {name} pointing at {oid}")?;

        Ok(())
    }
}
