use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print every object hash currently in the store, one per line
    pub fn ls_objects(&mut self) -> anyhow::Result<()> {
        for oid in self.database().list_object_ids()? {
            writeln!(self.writer(), "{oid}")?;
        }

        Ok(())
    }
}
