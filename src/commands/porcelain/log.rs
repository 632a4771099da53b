use crate::areas::repository::Repository;
use crate::artifacts::log::history::History;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::revision::revision::Revision;
use std::io::Write;

const GRAPH_NAME: &str = "sprig";

impl Repository {
    /// Print the parent graph reachable from `commit` in Graphviz dot syntax
    pub fn log(&self, commit: &str) -> anyhow::Result<()> {
        let oid = Revision::new(commit).resolve(self, Some(ObjectType::Commit))?;

        writeln!(self.writer(), "digraph {}{{", GRAPH_NAME)?;
        for edge in History::new(self.database(), oid) {
            let edge = edge?;
            writeln!(self.writer(), "c_{} -> c_{};", edge.child, edge.parent)?;
        }
        writeln!(self.writer(), "}}")?;

        Ok(())
    }
}
