use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print `<oid> <name>` for every ref, sorted by name
    pub fn show_ref(&self) -> anyhow::Result<()> {
        for (name, oid) in self.refs().list_refs()? {
            writeln!(self.writer(), "{} {}", oid, name)?;
        }

        Ok(())
    }
}
