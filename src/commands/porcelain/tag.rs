use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::tag::Tag;
use crate::artifacts::revision::ref_name::{RefName, TAGS_PREFIX};
use crate::artifacts::revision::revision::Revision;
use std::io::Write;

const DEFAULT_TAG_TARGET: &str = "HEAD";

#[derive(Debug, Clone, Default)]
pub struct TagOptions {
    /// Create a tag object instead of a plain ref
    pub annotate: bool,
    pub message: Option<String>,
}

impl Repository {
    /// List tags when `name` is absent, otherwise tag `object` (HEAD by default)
    pub fn tag(
        &self,
        name: Option<&str>,
        object: Option<&str>,
        options: &TagOptions,
    ) -> anyhow::Result<()> {
        let Some(name) = name else {
            return self.list_tags();
        };

        let ref_name = RefName::tag(name)?;
        let target = Revision::new(object.unwrap_or(DEFAULT_TAG_TARGET)).resolve(self, None)?;

        let oid = if options.annotate {
            let target_type = self.database().object_type(&target)?;
            let tagger = Author::load_from_env()?;
            let mut message = options.message.clone().unwrap_or_default();
            if !message.is_empty() && !message.ends_with('\n') {
                message.push('\n');
            }
            let tag = Tag::annotate(&target, target_type, name, &tagger, &message);

            self.database().store(&tag)?
        } else {
            target
        };

        self.refs().write_ref(&ref_name, &oid)
    }

    fn list_tags(&self) -> anyhow::Result<()> {
        for name in self.refs().list_refs()?.keys() {
            if let Some(tag) = name.strip_prefix(TAGS_PREFIX) {
                writeln!(self.writer(), "{}", tag)?;
            }
        }

        Ok(())
    }
}
