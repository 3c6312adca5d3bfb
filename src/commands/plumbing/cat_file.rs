use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;

impl Repository {
    /// Print the raw content of the object identified by `sha`
    pub fn cat_file(&mut self, sha: &str) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(sha.to_string())
            .with_context(|| format!("'{sha}' is not a valid object id"))?;

        let mut writer = self.writer();
        self.database()
            .print_object(&oid, &mut **writer)
            .with_context(|| format!("unable to read object {oid}"))?;

        Ok(())
    }
}
