use crate::areas::repository::Repository;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Snapshot the working tree and record a commit on the current branch
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let branch = self
            .refs()
            .current_branch()
            .context("cannot commit in detached HEAD mode")?;

        let root = self.layout().root().to_path_buf();
        let tree_oid = self
            .workspace()
            .hash_tree(&root, true, self.database())
            .context("could not snapshot the working tree")?;

        // a branch without commits yet simply yields no parent
        let parent = self.refs().head_commit_hash()?;

        let commit = self.new_commit(tree_oid, parent, message)?;
        let commit_oid = self
            .database()
            .store(&commit)
            .context("failed to write the commit object")?;

        self.refs().point_branch_at(&branch, &commit_oid)?;
        self.refs().point_head_at_branch(&branch)?;

        writeln!(self.writer(), "commit {commit_oid}")?;
        let mut writer = self.writer();
        self.database().print_object(&commit_oid, &mut **writer)?;

        Ok(())
    }
}
