//! Plumbing commands (low-level Git operations)
//!
//! ## Commands
//!
//! - `cat-file`: Print the payload of an object
//! - `hash-object`: Compute an object ID and optionally store the object
//! - `ls-tree`: List the entries of a tree
//! - `rev-parse`: Resolve a revision expression to an object ID
//! - `show-ref`: List every reference with its target
//! - `update-ref`: Point a reference at an object

pub mod cat_file;
pub mod hash_object;
pub mod ls_tree;
pub mod rev_parse;
pub mod show_ref;
pub mod update_ref;
