//! Command implementations
//!
//! Commands are `impl Repository` blocks that write their output to the repository writer.
//!
//! - `plumbing`: Direct object and reference manipulation (hash-object, cat-file, rev-parse, ...)
//! - `porcelain`: User-facing workflows (init, log, checkout, tag)

pub mod plumbing;
pub mod porcelain;
