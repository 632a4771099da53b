//! Core repository components
//!
//! - `config`: INI configuration of the control directory
//! - `database`: Compressed, content-addressed object store
//! - `refs`: Reference management (HEAD, branches, tags)
//! - `repository`: Discovery, validation and access to the other areas
//! - `workspace`: Plain file system operations under a root directory

pub mod config;
pub mod database;
pub mod refs;
pub mod repository;
pub mod workspace;
