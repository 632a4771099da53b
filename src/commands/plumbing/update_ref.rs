use crate::areas::repository::Repository;
use crate::artifacts::revision::ref_name::RefName;
use crate::artifacts::revision::revision::Revision;
use tracing::info;

impl Repository {
    /// Point `name` (or the ref it symbolically leads to) at the object `object` resolves to
    pub fn update_ref(&self, name: &str, object: &str) -> anyhow::Result<()> {
        let name = RefName::try_parse(name.to_string())?;
        let oid = Revision::new(object).resolve(self, None)?;

        if !self.database().exists(&oid) {
            anyhow::bail!("cannot point {} at missing object {}", name, oid);
        }

        self.refs().update_ref(&name, &oid)?;
        info!(name = %name, %oid, "updated ref");

        Ok(())
    }
}
