use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::SprigError;
use derive_new::new;
use std::path::Path;
use tracing::{debug, warn};

#[derive(new)]
pub struct Materializer<'d> {
    database: &'d Database,
    workspace: &'d Workspace,
}

impl Materializer<'_> {
    /// Expand the tree behind `oid` into `target`, relative to the workspace root
    ///
    /// Tags are peeled and commits are replaced by their tree. Any other object kind
    /// is rejected with `TypeMismatch`.
    pub fn checkout(&self, oid: &ObjectId, target: &Path) -> anyhow::Result<()> {
        let tree = self.peel_to_tree(oid)?;
        self.write_tree(&tree, target)
    }

    fn peel_to_tree(&self, oid: &ObjectId) -> anyhow::Result<Tree> {
        let mut oid = oid.clone();

        loop {
            oid = match self.database.load(&oid)? {
                ObjectBox::Tree(tree) => return Ok(*tree),
                ObjectBox::Commit(commit) => commit
                    .tree()?
                    .ok_or_else(|| SprigError::NoTreeInCommit(oid.clone()))?,
                ObjectBox::Tag(tag) => tag.object()?.ok_or_else(|| {
                    SprigError::malformed(format!("tag {} has no object field", oid))
                })?,
                ObjectBox::Blob(_) => {
                    return Err(SprigError::TypeMismatch {
                        oid,
                        expected: ObjectType::Tree,
                        actual: ObjectType::Blob,
                    }
                    .into());
                }
            };
        }
    }

    fn write_tree(&self, tree: &Tree, target: &Path) -> anyhow::Result<()> {
        let dir_path = self.workspace.prepare_empty_dir(target)?;

        for entry in tree.entries() {
            let entry_path = dir_path.join(entry.path());

            match entry.object_type() {
                ObjectType::Blob => {
                    let blob = self.database.load_as::<Blob>(entry.oid())?;
                    self.workspace.write_file(&entry_path, blob.content())?;
                    debug!(path = ?entry_path, oid = %entry.oid(), "wrote file");
                }
                ObjectType::Tree => {
                    let subtree = self.database.load_as::<Tree>(entry.oid())?;
                    self.write_tree(&subtree, &entry_path)?;
                }
                other => {
                    warn!(path = ?entry_path, kind = %other, "skipping entry");
                }
            }
        }

        Ok(())
    }
}
