use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::revision::revision::Revision;
use std::io::Write;

impl Repository {
    /// List a tree; commits and tags are dereferenced to the tree they lead to
    pub fn ls_tree(&self, object: &str) -> anyhow::Result<()> {
        let oid = Revision::new(object).resolve(self, Some(ObjectType::Tree))?;
        let tree = self.database().load_as::<Tree>(&oid)?;

        if !tree.is_empty() {
            writeln!(self.writer(), "{}", tree.display())?;
        }

        Ok(())
    }
}
