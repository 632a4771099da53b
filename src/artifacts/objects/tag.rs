//! Git tag object
//!
//! Annotated tags share the commit payload grammar but are a distinct kind: they point at
//! one object of any type through their `object` field.

use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::kvlm::Kvlm;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;

pub const OBJECT_KEY: &str = "object";
pub const TYPE_KEY: &str = "type";
pub const TAG_KEY: &str = "tag";
pub const TAGGER_KEY: &str = "tagger";

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Tag {
    kvlm: Kvlm,
}

impl Tag {
    pub fn new(kvlm: Kvlm) -> Self {
        Tag { kvlm }
    }

    /// Build an annotated tag pointing at `object`
    pub fn annotate(
        object: &ObjectId,
        object_type: ObjectType,
        name: &str,
        tagger: &Author,
        message: &str,
    ) -> Self {
        let mut kvlm = Kvlm::default();
        kvlm.push(OBJECT_KEY, object.as_ref());
        kvlm.push(TYPE_KEY, object_type.as_str());
        kvlm.push(TAG_KEY, name);
        kvlm.push(TAGGER_KEY, tagger.display());
        kvlm.set_message(message);

        Tag { kvlm }
    }

    pub fn kvlm(&self) -> &Kvlm {
        &self.kvlm
    }

    /// The tagged object
    pub fn object(&self) -> anyhow::Result<Option<ObjectId>> {
        self.kvlm
            .first(OBJECT_KEY)
            .map(|object| ObjectId::try_parse(object.to_string()))
            .transpose()
            .context("Invalid tag object: invalid object line")
    }

    /// Declared type of the tagged object
    pub fn target_type(&self) -> anyhow::Result<Option<ObjectType>> {
        self.kvlm
            .first(TYPE_KEY)
            .map(ObjectType::try_from)
            .transpose()
    }

    pub fn name(&self) -> Option<&str> {
        self.kvlm.first(TAG_KEY)
    }

    pub fn tagger(&self) -> Option<&str> {
        self.kvlm.first(TAGGER_KEY)
    }

    pub fn message(&self) -> &str {
        self.kvlm.message()
    }
}

impl Packable for Tag {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(Bytes::from(self.kvlm.serialize()))
    }
}

impl Unpackable for Tag {
    const OBJECT_TYPE: ObjectType = ObjectType::Tag;

    fn deserialize(payload: &[u8]) -> anyhow::Result<Self> {
        Ok(Self::new(Kvlm::parse(payload)?))
    }
}

impl Object for Tag {
    fn object_type(&self) -> ObjectType {
        Self::OBJECT_TYPE
    }

    fn display(&self) -> String {
        self.kvlm.serialize()
    }
}
