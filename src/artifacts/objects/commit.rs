//! Git commit object
//!
//! Commits are kept as the raw key-value list they were parsed from, so any header
//! (including ones this crate does not know about) survives a load/store cycle.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::kvlm::Kvlm;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;

pub const TREE_KEY: &str = "tree";
pub const PARENT_KEY: &str = "parent";
pub const AUTHOR_KEY: &str = "author";
pub const COMMITTER_KEY: &str = "committer";

/// Author, committer or tagger identity
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    /// Create an identity stamped with the current local time
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Render as `Name <email> timestamp timezone`
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Load the identity from `GIT_AUTHOR_NAME` and `GIT_AUTHOR_EMAIL`
    pub fn load_from_env() -> anyhow::Result<Self> {
        let name = std::env::var("GIT_AUTHOR_NAME").context("GIT_AUTHOR_NAME not set")?;
        let email = std::env::var("GIT_AUTHOR_EMAIL").context("GIT_AUTHOR_EMAIL not set")?;

        Ok(Author::new(name, email))
    }
}

/// Git commit object
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Commit {
    kvlm: Kvlm,
}

impl Commit {
    pub fn new(kvlm: Kvlm) -> Self {
        Commit { kvlm }
    }

    pub fn kvlm(&self) -> &Kvlm {
        &self.kvlm
    }

    pub fn tree(&self) -> anyhow::Result<Option<ObjectId>> {
        self.kvlm
            .first(TREE_KEY)
            .map(|tree| ObjectId::try_parse(tree.to_string()))
            .transpose()
            .context("Invalid commit object: invalid tree line")
    }

    /// Parent commit IDs, empty for a root commit
    pub fn parents(&self) -> anyhow::Result<Vec<ObjectId>> {
        self.kvlm
            .get(PARENT_KEY)
            .unwrap_or_default()
            .iter()
            .map(|parent| ObjectId::try_parse(parent.to_string()))
            .collect::<anyhow::Result<Vec<_>>>()
            .context("Invalid commit object: invalid parent line")
    }

    pub fn author(&self) -> Option<&str> {
        self.kvlm.first(AUTHOR_KEY)
    }

    pub fn committer(&self) -> Option<&str> {
        self.kvlm.first(COMMITTER_KEY)
    }

    pub fn message(&self) -> &str {
        self.kvlm.message()
    }

    /// First line of the message, for one-line listings
    pub fn short_message(&self) -> String {
        self.message().lines().next().unwrap_or("").to_string()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(Bytes::from(self.kvlm.serialize()))
    }
}

impl Unpackable for Commit {
    const OBJECT_TYPE: ObjectType = ObjectType::Commit;

    fn deserialize(payload: &[u8]) -> anyhow::Result<Self> {
        Ok(Self::new(Kvlm::parse(payload)?))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        Self::OBJECT_TYPE
    }

    fn display(&self) -> String {
        self.kvlm.serialize()
    }
}
