//! Git references (HEAD, branches, tags)
//!
//! A reference is a human-readable name pointing to an object. It is either:
//! - Direct: the file holds a 40-character object ID
//! - Symbolic: the file holds `ref: <other-name>` and resolution continues there
//!
//! ## File Format
//!
//! ```text
//! ref: refs/heads/master
//! ```
//!
//! or
//!
//! ```text
//! 3b18e512dba79e4c8300dd08aeb37f8e728b8dad
//! ```
//!
//! Both forms end with a single newline. Names are paths relative to the control directory.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::revision::ref_name::RefName;
use crate::errors::SprigError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Marker that prefixes the target of a symbolic reference
const SYMREF_PREFIX: &str = "ref: ";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Namespace walked when listing references
pub const REFS_DIR: &str = "refs";

/// References manager rooted at the control directory
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

/// Parsed content of a single ref file
#[derive(Debug, Clone, PartialEq, Eq)]
enum SymRefOrOid {
    SymRef(String),
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read(path: &Path, name: &str) -> anyhow::Result<SymRefOrOid> {
        if !path.is_file() {
            return Err(SprigError::NoSuchReference(name.to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        match content.strip_prefix(SYMREF_PREFIX) {
            Some(target) => Ok(SymRefOrOid::SymRef(target.trim().to_string())),
            None => ObjectId::try_parse(content.to_string())
                .map(SymRefOrOid::Oid)
                .with_context(|| format!("ref {} does not hold an object id", name)),
        }
    }
}

impl Refs {
    /// Follow symbolic indirection from `name` down to an object ID
    ///
    /// Fails with `SymbolicRefCycle` when a name is revisited.
    pub fn resolve_symbolic(&self, name: &str) -> anyhow::Result<ObjectId> {
        let mut visited = HashSet::new();
        let mut current = name.to_string();

        loop {
            if !visited.insert(current.clone()) {
                return Err(SprigError::SymbolicRefCycle(current).into());
            }

            match SymRefOrOid::read(&self.path.join(&current), &current)? {
                SymRefOrOid::SymRef(target) => current = target,
                SymRefOrOid::Oid(oid) => return Ok(oid),
            }
        }
    }

    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        self.resolve_symbolic(HEAD_REF_NAME)
    }

    /// Every ref under `refs/`, keyed by its path relative to the control directory
    pub fn list_refs(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        let refs_path = self.path.join(REFS_DIR);
        if !refs_path.is_dir() {
            return Ok(BTreeMap::new());
        }

        let mut refs = BTreeMap::new();
        for entry in WalkDir::new(&refs_path) {
            let entry = entry.with_context(|| format!("failed to walk {:?}", refs_path))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let name = Self::ref_name_for(&self.path, entry.path())?;
            let oid = self.resolve_symbolic(&name)?;
            refs.insert(name, oid);
        }

        Ok(refs)
    }

    /// Point `name` directly at `oid`, creating or overwriting the ref file
    pub fn write_ref(&self, name: &RefName, oid: &ObjectId) -> anyhow::Result<()> {
        self.write_ref_file(&self.path.join(name.as_ref()), format!("{}\n", oid))?;
        debug!(name = %name, %oid, "wrote ref");

        Ok(())
    }

    /// Make `name` a symbolic ref to `target`
    pub fn write_symbolic_ref(&self, name: &RefName, target: &RefName) -> anyhow::Result<()> {
        self.write_ref_file(
            &self.path.join(name.as_ref()),
            format!("{}{}\n", SYMREF_PREFIX, target),
        )?;
        debug!(name = %name, target = %target, "wrote symbolic ref");

        Ok(())
    }

    /// Move the ref at the end of the symbolic chain starting at `name` to `oid`
    ///
    /// Updating `HEAD` while it points at `refs/heads/master` moves the branch, not HEAD.
    /// A missing terminal ref is created.
    pub fn update_ref(&self, name: &RefName, oid: &ObjectId) -> anyhow::Result<()> {
        let terminal = self.terminal_name(name.as_ref())?;
        self.write_ref(&RefName::try_parse(terminal)?, oid)
    }

    /// Name of the last ref in the symbolic chain starting at `name`
    fn terminal_name(&self, name: &str) -> anyhow::Result<String> {
        let mut visited = HashSet::new();
        let mut current = name.to_string();

        loop {
            if !visited.insert(current.clone()) {
                return Err(SprigError::SymbolicRefCycle(current).into());
            }

            match SymRefOrOid::read(&self.path.join(&current), &current) {
                Ok(SymRefOrOid::SymRef(target)) => current = target,
                Ok(SymRefOrOid::Oid(_)) => return Ok(current),
                Err(err) => match err.downcast_ref::<SprigError>() {
                    Some(SprigError::NoSuchReference(_)) => return Ok(current),
                    _ => return Err(err),
                },
            }
        }
    }

    fn write_ref_file(&self, path: &Path, raw_ref: String) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    /// Ref names always use `/`, whatever the platform separator
    fn ref_name_for(root: &Path, path: &Path) -> anyhow::Result<String> {
        let relative = path
            .strip_prefix(root)
            .with_context(|| format!("ref {:?} is outside {:?}", path, root))?;

        Ok(relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"))
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join(REFS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn refs() -> (TempDir, Refs) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let refs = Refs::new(dir.path().to_path_buf().into_boxed_path());
        (dir, refs)
    }

    fn oid(fill: char) -> ObjectId {
        ObjectId::try_parse(fill.to_string().repeat(40)).unwrap()
    }

    fn name(name: &str) -> RefName {
        RefName::try_parse(name.to_string()).unwrap()
    }

    fn write_raw(dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn error_of(err: &anyhow::Error) -> &SprigError {
        err.downcast_ref::<SprigError>()
            .unwrap_or_else(|| panic!("expected SprigError, got {err:?}"))
    }

    #[rstest]
    fn resolves_direct_refs(refs: (TempDir, Refs)) {
        let (dir, refs) = refs;
        write_raw(&dir, "refs/heads/master", &format!("{}\n", oid('a')));

        assert_eq!(refs.resolve_symbolic("refs/heads/master").unwrap(), oid('a'));
    }

    #[rstest]
    fn follows_symbolic_chains(refs: (TempDir, Refs)) {
        let (dir, refs) = refs;
        write_raw(&dir, "HEAD", "ref: refs/heads/master\n");
        write_raw(&dir, "refs/heads/master", "ref: refs/heads/dev\n");
        write_raw(&dir, "refs/heads/dev", &oid('b').to_string());

        assert_eq!(refs.read_head().unwrap(), oid('b'));
    }

    #[rstest]
    fn missing_ref_is_no_such_reference(refs: (TempDir, Refs)) {
        let (dir, refs) = refs;
        write_raw(&dir, "HEAD", "ref: refs/heads/master\n");

        let err = refs.read_head().unwrap_err();
        assert!(matches!(
            error_of(&err),
            SprigError::NoSuchReference(name) if name == "refs/heads/master"
        ));
    }

    #[rstest]
    fn cycles_are_detected(refs: (TempDir, Refs)) {
        let (dir, refs) = refs;
        write_raw(&dir, "refs/heads/a", "ref: refs/heads/b\n");
        write_raw(&dir, "refs/heads/b", "ref: refs/heads/a\n");
        write_raw(&dir, "refs/heads/self", "ref: refs/heads/self\n");

        for start in ["refs/heads/a", "refs/heads/self"] {
            let err = refs.resolve_symbolic(start).unwrap_err();
            assert!(matches!(error_of(&err), SprigError::SymbolicRefCycle(_)));
        }
    }

    #[rstest]
    fn lists_every_ref_in_the_namespace(refs: (TempDir, Refs)) {
        let (dir, refs) = refs;
        write_raw(&dir, "HEAD", "ref: refs/heads/master\n");
        write_raw(&dir, "refs/heads/master", &format!("{}\n", oid('a')));
        write_raw(&dir, "refs/heads/feature/x", &format!("{}\n", oid('b')));
        write_raw(&dir, "refs/tags/v1", "ref: refs/heads/master\n");

        let listed = refs.list_refs().unwrap();

        assert_eq!(
            listed.into_iter().collect::<Vec<_>>(),
            vec![
                ("refs/heads/feature/x".to_string(), oid('b')),
                ("refs/heads/master".to_string(), oid('a')),
                ("refs/tags/v1".to_string(), oid('a')),
            ]
        );
    }

    #[rstest]
    fn empty_namespace_lists_nothing(refs: (TempDir, Refs)) {
        let (_dir, refs) = refs;
        assert!(refs.list_refs().unwrap().is_empty());
    }

    #[rstest]
    fn writes_direct_and_symbolic_refs(refs: (TempDir, Refs)) {
        let (dir, refs) = refs;

        refs.write_ref(&name("refs/tags/v1"), &oid('c')).unwrap();
        refs.write_symbolic_ref(&name("HEAD"), &name("refs/tags/v1"))
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("refs/tags/v1")).unwrap(),
            format!("{}\n", oid('c'))
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("HEAD")).unwrap(),
            "ref: refs/tags/v1\n"
        );
        assert_eq!(refs.read_head().unwrap(), oid('c'));
    }

    #[rstest]
    fn update_through_head_moves_the_branch(refs: (TempDir, Refs)) {
        let (dir, refs) = refs;
        write_raw(&dir, "HEAD", "ref: refs/heads/master\n");

        refs.update_ref(&name("HEAD"), &oid('d')).unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("HEAD")).unwrap(),
            "ref: refs/heads/master\n"
        );
        assert_eq!(refs.resolve_symbolic("refs/heads/master").unwrap(), oid('d'));

        refs.update_ref(&name("HEAD"), &oid('e')).unwrap();
        assert_eq!(refs.read_head().unwrap(), oid('e'));
    }
}
