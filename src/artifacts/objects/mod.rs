//! Git object types and operations
//!
//! Git stores all content as objects identified by SHA-1 hashes. There are four types:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (modes, paths and object IDs)
//! - **Commit**: Snapshot metadata kept as a key-value list with a message
//! - **Tag**: Annotated pointer to another object, same grammar as a commit
//!
//! Every object is stored inside the envelope `<type> <size>\0<payload>`, see [`envelope`].

pub mod blob;
pub mod commit;
pub mod envelope;
pub mod kvlm;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tag;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const OBJECT_ID_RAW_LENGTH: usize = OBJECT_ID_LENGTH / 2;
