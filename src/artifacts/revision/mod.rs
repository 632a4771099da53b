//! Revision expressions and reference names
//!
//! - `ref_name`: validated reference names (`HEAD`, `refs/heads/master`, ...)
//! - `revision`: `rev-parse` style resolution of user input to a single object ID

pub mod ref_name;
pub mod revision;

pub const INVALID_REF_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
pub const HASH_REGEX: &str = r"^[0-9A-Fa-f]{1,40}$";

/// Shortest hash prefix that triggers an object directory scan
pub const MIN_PREFIX_LENGTH: usize = 4;

pub const REF_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "@" => "HEAD",
    "master" => "refs/heads/master",
};
