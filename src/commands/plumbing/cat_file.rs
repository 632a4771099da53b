use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::revision::revision::Revision;
use std::io::Write;

impl Repository {
    pub fn cat_file(&self, object_type: ObjectType, object: &str) -> anyhow::Result<()> {
        let oid = Revision::new(object).resolve(self, Some(object_type))?;

        match self.database().load(&oid)? {
            // blobs are written byte for byte, they need not be text
            ObjectBox::Blob(blob) => self.writer().write_all(blob.content())?,
            ObjectBox::Tree(tree) => writeln!(self.writer(), "{}", tree.display())?,
            other => write!(self.writer(), "{}", other.display())?,
        }

        Ok(())
    }
}
