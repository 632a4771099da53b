//! Error taxonomy for the object store and revision resolver
//!
//! Every variant is terminal for the operation that raised it. Functions return
//! `anyhow::Result` and raise these through `anyhow`, so callers that care about the
//! exact failure recover it with `err.downcast_ref::<SprigError>()`.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SprigError {
    #[error("malformed object: {0}")]
    MalformedObject(String),

    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    #[error("object {oid} is a {actual}, not a {expected}")]
    TypeMismatch {
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },

    #[error("no such reference {0}")]
    NoSuchReference(String),

    #[error("ambiguous reference {name}: candidates are:\n{}", join_candidates(.candidates))]
    AmbiguousReference {
        name: String,
        candidates: Vec<ObjectId>,
    },

    #[error("cannot resolve {name} to a {expected}: stopped at {actual} {oid}")]
    WrongRevisionType {
        name: String,
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },

    #[error("directory {0} is not empty")]
    DirectoryNotEmpty(PathBuf),

    #[error("commit {0} has no tree")]
    NoTreeInCommit(ObjectId),

    #[error("unsupported repository format version {0}")]
    UnsupportedRepositoryFormat(String),

    #[error("not a git repository (or any of the parent directories): {0}")]
    NotARepository(PathBuf),

    #[error("configuration file missing: {0}")]
    MissingConfig(PathBuf),

    #[error("symbolic reference cycle at {0}")]
    SymbolicRefCycle(String),

    #[error("invalid reference name: {0}")]
    InvalidRefName(String),
}

impl SprigError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        SprigError::MalformedObject(reason.into())
    }
}

fn join_candidates(candidates: &[ObjectId]) -> String {
    candidates
        .iter()
        .map(ObjectId::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}
