//! sprig: a Git-compatible object store and revision resolver
//!
//! - `areas`: The on-disk parts of a repository (objects, refs, config, files)
//! - `artifacts`: Object model, revision resolution, history walk and checkout
//! - `commands`: One `impl Repository` block per CLI command
//! - `errors`: Typed failures raised through `anyhow`

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
