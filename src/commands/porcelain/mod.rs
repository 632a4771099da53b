//! Porcelain commands (user-facing Git operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `log`: Render commit history as a Graphviz graph
//! - `checkout`: Write the files of a commit or tree into an empty directory
//! - `tag`: List, create lightweight, or create annotated tags

pub mod checkout;
pub mod init;
pub mod log;
pub mod tag;
