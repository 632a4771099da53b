//! Tree materialization
//!
//! Writes the files of a tree (or of a commit's tree) into a directory. The target and
//! every sub-directory must be empty or absent; nothing already on disk is overwritten.
//!
//! - `materializer`: Recursive expansion of trees into files and directories

pub mod materializer;
