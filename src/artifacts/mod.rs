//! Git data structures and algorithms
//!
//! - `checkout`: Materializing trees into directories
//! - `log`: Commit history traversal
//! - `objects`: Git object types (blob, tree, commit, tag) and their envelope
//! - `revision`: Reference names and revision resolution

pub mod checkout;
pub mod log;
pub mod objects;
pub mod revision;
