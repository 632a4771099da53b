use crate::areas::config::Config;
use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::errors::SprigError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the control directory inside a work tree
pub const GIT_DIR: &str = ".git";

pub struct Repository {
    path: Box<Path>,
    git_dir: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Build a repository handle without checking that anything exists on disk
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> Self {
        let git_dir = path.join(GIT_DIR);

        Repository {
            path: path.to_path_buf().into_boxed_path(),
            database: Database::new(git_dir.join("objects").into_boxed_path()),
            workspace: Workspace::new(path.to_path_buf().into_boxed_path()),
            refs: Refs::new(git_dir.clone().into_boxed_path()),
            git_dir: git_dir.into_boxed_path(),
            writer: RefCell::new(writer),
        }
    }

    /// Open the repository whose work tree is `path`, validating its control directory
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("failed to access {:?}", path))?;
        let repository = Self::new(&path, writer);

        if !repository.git_dir.is_dir() {
            return Err(SprigError::NotARepository(path).into());
        }
        repository.config()?.check_format_version()?;

        Ok(repository)
    }

    /// Walk upward from `start` until a directory holding a control directory is found
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("failed to access {:?}", start))?;
        let mut current = start.as_path();

        loop {
            if current.join(GIT_DIR).is_dir() {
                debug!(path = ?current, "found repository");
                return Self::open(current, writer);
            }

            match current.parent() {
                Some(parent) if parent != current => current = parent,
                _ => return Err(SprigError::NotARepository(start).into()),
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn git_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.git_dir.join(relative)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn config(&self) -> anyhow::Result<Config> {
        Config::load(&self.git_path("config"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::areas::config::{CORE_SECTION, FORMAT_VERSION_KEY};
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    fn error_of(err: &anyhow::Error) -> &SprigError {
        err.downcast_ref::<SprigError>()
            .unwrap_or_else(|| panic!("expected SprigError, got {err:?}"))
    }

    fn control_dir_with_config(dir: &TempDir, version: &str) {
        dir.child(".git").create_dir_all().unwrap();
        let mut config = Config::default();
        config.set(CORE_SECTION, FORMAT_VERSION_KEY, version);
        config.save(&dir.path().join(".git").join("config")).unwrap();
    }

    #[test]
    fn open_requires_a_control_directory() {
        let dir = TempDir::new().unwrap();

        let err = Repository::open(dir.path(), Box::new(std::io::sink()))
            .err()
            .unwrap();
        assert!(matches!(error_of(&err), SprigError::NotARepository(_)));
    }

    #[test]
    fn open_requires_a_config_file() {
        let dir = TempDir::new().unwrap();
        dir.child(".git").create_dir_all().unwrap();

        let err = Repository::open(dir.path(), Box::new(std::io::sink()))
            .err()
            .unwrap();
        assert!(matches!(error_of(&err), SprigError::MissingConfig(_)));
    }

    #[test]
    fn open_rejects_other_format_versions() {
        let dir = TempDir::new().unwrap();
        control_dir_with_config(&dir, "1");

        let err = Repository::open(dir.path(), Box::new(std::io::sink()))
            .err()
            .unwrap();
        assert!(matches!(
            error_of(&err),
            SprigError::UnsupportedRepositoryFormat(version) if version == "1"
        ));
    }

    #[test]
    fn discover_walks_up_from_nested_directories() {
        let dir = TempDir::new().unwrap();
        control_dir_with_config(&dir, "0");
        dir.child("a/b/c").create_dir_all().unwrap();

        let repository =
            Repository::discover(&dir.path().join("a/b/c"), Box::new(std::io::sink())).unwrap();

        assert_eq!(repository.path(), dir.path().canonicalize().unwrap());
    }
}
