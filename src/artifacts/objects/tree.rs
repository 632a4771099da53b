//! Git tree object
//!
//! Trees represent directory snapshots. Each entry names a blob (file), a nested tree
//! (directory) or a commit (gitlink), together with its mode.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <path>\0<20-byte-sha1>`
//!
//! Modes are variable-length decimal digits on input and are always rendered back as six
//! zero-padded digits. Entries keep the order they were parsed or appended in.

use crate::artifacts::objects::OBJECT_ID_RAW_LENGTH;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::SprigError;
use bytes::Bytes;
use derive_new::new;
use std::io::Write;

const DIRECTORY_MODE: u32 = 40000;
const GITLINK_MODE: u32 = 160000;

/// One `<mode> <path> <oid>` record of a tree
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    mode: u32,
    path: String,
    oid: ObjectId,
}

impl TreeEntry {
    /// Mode as the fixed 6-digit string written to disk
    pub fn mode(&self) -> String {
        format!("{:06}", self.mode)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    /// Kind of object the entry points at, as implied by its mode
    pub fn object_type(&self) -> ObjectType {
        match self.mode {
            DIRECTORY_MODE => ObjectType::Tree,
            GITLINK_MODE => ObjectType::Commit,
            _ => ObjectType::Blob,
        }
    }

    /// Parse one entry starting at `start`, returning it with the offset just past it
    fn parse(payload: &[u8], start: usize) -> anyhow::Result<(Self, usize)> {
        let space = find(payload, b' ', start)
            .ok_or_else(|| SprigError::malformed("tree entry: unexpected end of mode"))?;
        let mode = &payload[start..space];
        if mode.is_empty() || !mode.iter().all(u8::is_ascii_digit) {
            return Err(SprigError::malformed("tree entry: bad mode").into());
        }
        let mode: u32 = std::str::from_utf8(mode)
            .ok()
            .and_then(|mode| mode.parse().ok())
            .ok_or_else(|| SprigError::malformed("tree entry: bad mode"))?;

        let nul = find(payload, b'\0', space + 1)
            .ok_or_else(|| SprigError::malformed("tree entry: unexpected end of path"))?;
        let path = std::str::from_utf8(&payload[space + 1..nul])
            .map_err(|_| SprigError::malformed("tree entry: path is not valid UTF-8"))?
            .to_owned();

        let end = nul + 1 + OBJECT_ID_RAW_LENGTH;
        if end > payload.len() {
            return Err(SprigError::malformed("tree entry: truncated object id").into());
        }
        let oid = ObjectId::from_raw(&payload[nul + 1..end])?;

        Ok((Self::new(mode, path, oid), end))
    }
}

fn find(haystack: &[u8], needle: u8, start: usize) -> Option<usize> {
    haystack
        .get(start..)?
        .iter()
        .position(|&b| b == needle)
        .map(|offset| start + offset)
}

/// Git tree object representing a directory snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Tree { entries }
    }

    /// Append an entry; no sorting is applied
    pub fn push(&mut self, entry: TreeEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content = Vec::new();

        for entry in &self.entries {
            write!(content, "{} {}\0", entry.mode(), entry.path)?;
            entry.oid.write_raw_to(&mut content)?;
        }

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Tree {
    const OBJECT_TYPE: ObjectType = ObjectType::Tree;

    fn deserialize(payload: &[u8]) -> anyhow::Result<Self> {
        let mut entries = Vec::new();
        let mut position = 0;

        while position < payload.len() {
            let (entry, next) = TreeEntry::parse(payload, position)?;
            entries.push(entry);
            position = next;
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        Self::OBJECT_TYPE
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{} {} {}\t{}",
                    entry.mode(),
                    entry.object_type(),
                    entry.oid,
                    entry.path
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
