use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Print the ID the file would have as an object of `object_type`, storing it if `write`
    ///
    /// The file content must parse as that kind of object, so hashing a random file as a
    /// tree fails instead of producing an unreadable object.
    pub fn hash_object(
        &self,
        object_path: &Path,
        object_type: ObjectType,
        write: bool,
    ) -> anyhow::Result<()> {
        let data = self.workspace().read_file(object_path)?;
        let object = ObjectBox::deserialize(object_type, &data)?;

        let object_id = if write {
            self.database().store(&object)?
        } else {
            object.object_id()?
        };

        writeln!(self.writer(), "{}", object_id)?;

        Ok(())
    }
}
