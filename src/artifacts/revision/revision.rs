use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::revision::{HASH_REGEX, MIN_PREFIX_LENGTH, REF_ALIASES};
use crate::errors::SprigError;
use anyhow::Context;
use tracing::debug;

/// A revision expression as typed by the user
///
/// Supports:
/// - `HEAD` and its alias `@`
/// - Ref names and any trailing part of them: `refs/heads/master`, `heads/master`, `master`
/// - Full object IDs and abbreviated ones of at least four hex digits
///
/// Every source that matches contributes a candidate. Resolution succeeds only when exactly
/// one candidate remains, so a tag named like a hash prefix makes that prefix ambiguous.
///
/// # Examples
///
/// ```ignore
/// let oid = Revision::new("v1.0").resolve(&repository, Some(ObjectType::Commit))?;
/// let tree = Revision::new("HEAD").resolve(&repository, Some(ObjectType::Tree))?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    expression: String,
}

impl Revision {
    pub fn new(expression: &str) -> Self {
        let expression = REF_ALIASES
            .get(expression)
            .copied()
            .unwrap_or(expression)
            .to_string();

        Revision { expression }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Resolve to a single object ID, dereferencing towards `expected_type` when given
    ///
    /// Fails with `NoSuchReference` or `AmbiguousReference` before any object is loaded.
    pub fn resolve(
        &self,
        repository: &Repository,
        expected_type: Option<ObjectType>,
    ) -> anyhow::Result<ObjectId> {
        let mut candidates = self.candidates(repository)?;

        let oid = match candidates.len() {
            0 => return Err(SprigError::NoSuchReference(self.expression.clone()).into()),
            1 => candidates.remove(0),
            _ => {
                return Err(SprigError::AmbiguousReference {
                    name: self.expression.clone(),
                    candidates,
                }
                .into());
            }
        };

        match expected_type {
            Some(expected_type) => self.coerce(repository, oid, expected_type),
            None => Ok(oid),
        }
    }

    /// Every object ID the expression could name, duplicates included
    pub fn candidates(&self, repository: &Repository) -> anyhow::Result<Vec<ObjectId>> {
        if self.expression == HEAD_REF_NAME {
            return Ok(vec![repository.refs().read_head()?]);
        }

        let mut candidates = repository
            .refs()
            .list_refs()?
            .into_iter()
            .filter(|(name, _)| Self::is_suffix_of(&self.expression, name))
            .map(|(_, oid)| oid)
            .collect::<Vec<_>>();

        candidates.extend(self.hash_candidates(repository)?);
        debug!(expression = %self.expression, count = candidates.len(), "gathered candidates");

        Ok(candidates)
    }

    fn hash_candidates(&self, repository: &Repository) -> anyhow::Result<Vec<ObjectId>> {
        let hash_regex = regex::Regex::new(HASH_REGEX)
            .with_context(|| format!("invalid hash regex: {HASH_REGEX}"))?;
        if !hash_regex.is_match(&self.expression) {
            return Ok(Vec::new());
        }

        let prefix = self.expression.to_ascii_lowercase();
        if prefix.len() == OBJECT_ID_LENGTH {
            Ok(vec![ObjectId::try_parse(prefix)?])
        } else if prefix.len() >= MIN_PREFIX_LENGTH {
            repository.database().find_objects_by_prefix(&prefix)
        } else {
            Ok(Vec::new())
        }
    }

    /// Whether the segments of `expression` are the trailing segments of `ref_name`
    fn is_suffix_of(expression: &str, ref_name: &str) -> bool {
        let expression = Self::segments(expression);
        let ref_name = Self::segments(ref_name);

        !expression.is_empty() && ref_name.ends_with(&expression)
    }

    fn segments(name: &str) -> Vec<&str> {
        name.split(['/', '\\'])
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// Follow tags to their target and commits to their tree until `expected_type` is reached
    fn coerce(
        &self,
        repository: &Repository,
        oid: ObjectId,
        expected_type: ObjectType,
    ) -> anyhow::Result<ObjectId> {
        let mut oid = oid;

        loop {
            let object = repository.database().load(&oid)?;
            let actual_type = object.object_type();
            if actual_type == expected_type {
                return Ok(oid);
            }

            oid = match (object, expected_type) {
                (ObjectBox::Tag(tag), _) => tag.object()?.ok_or_else(|| {
                    SprigError::malformed(format!("tag {} has no object field", oid))
                })?,
                (ObjectBox::Commit(commit), ObjectType::Tree) => commit
                    .tree()?
                    .ok_or_else(|| SprigError::NoTreeInCommit(oid.clone()))?,
                _ => {
                    return Err(SprigError::WrongRevisionType {
                        name: self.expression.clone(),
                        oid,
                        expected: expected_type,
                        actual: actual_type,
                    }
                    .into());
                }
            };
            debug!(%oid, "dereferenced");
        }
    }
}
