use crate::areas::repository::Repository;
use crate::artifacts::checkout::materializer::Materializer;
use crate::artifacts::revision::revision::Revision;
use std::path::Path;
use tracing::info;

impl Repository {
    /// Write the files of `object` (a commit, tree or tag) into the empty directory `target`
    pub fn checkout(&self, object: &str, target: &Path) -> anyhow::Result<()> {
        let oid = Revision::new(object).resolve(self, None)?;

        Materializer::new(self.database(), self.workspace()).checkout(&oid, target)?;
        info!(%oid, target = ?target, "checked out");

        Ok(())
    }
}
