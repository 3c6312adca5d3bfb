use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Hash a file as a blob or a directory as a tree, optionally writing
    /// the object(s) to the store
    pub fn hash_object(&mut self, path: &str, write: bool) -> anyhow::Result<()> {
        let path = std::fs::canonicalize(path)
            .with_context(|| format!("cannot access '{path}'"))?;

        let oid = if path.is_dir() {
            self.workspace().hash_tree(&path, write, self.database())?
        } else {
            let blob = self.workspace().parse_blob(&path)?;
            if write {
                self.database().store(&blob)?
            } else {
                blob.object_id()?
            }
        };

        writeln!(self.writer(), "{oid}")?;

        Ok(())
    }
}
