use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::revision::revision::Revision;
use std::io::Write;

impl Repository {
    pub fn rev_parse(&self, name: &str, object_type: Option<ObjectType>) -> anyhow::Result<()> {
        let oid = Revision::new(name).resolve(self, object_type)?;
        writeln!(self.writer(), "{}", oid)?;

        Ok(())
    }
}
