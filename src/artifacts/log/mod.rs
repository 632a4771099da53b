//! Commit history traversal
//!
//! - `history`: Lazy depth-first walk over commit parent edges
//!
//! ## Algorithm
//!
//! The walk keeps an explicit stack and a visited set keyed by object ID. Every parent
//! edge is yielded, but a commit reached through several children is only expanded once,
//! so diamonds and criss-cross merges terminate without repeating ancestors.

pub mod history;
