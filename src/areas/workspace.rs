use crate::errors::SprigError;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Plain files under a root directory
///
/// Relative paths are taken from the root; absolute paths are used as they are.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_path);
        let content = std::fs::read(&file_path)
            .with_context(|| format!("failed to read file {:?}", file_path))?;

        Ok(content.into())
    }

    /// Create `dir_path` if absent; fail with `DirectoryNotEmpty` if it already has entries
    pub fn prepare_empty_dir(&self, dir_path: &Path) -> anyhow::Result<PathBuf> {
        let dir_path = self.path.join(dir_path);

        if !dir_path.exists() {
            std::fs::create_dir_all(&dir_path)
                .with_context(|| format!("failed to create directory {:?}", dir_path))?;
        } else if !dir_path.is_dir() {
            anyhow::bail!("{:?} exists and is not a directory", dir_path);
        } else if Self::has_entries(&dir_path)? {
            return Err(SprigError::DirectoryNotEmpty(dir_path).into());
        }

        Ok(dir_path)
    }

    /// Write a new file; an existing file at the path is never replaced
    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(file_path);

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file_path)
            .with_context(|| format!("failed to create file {:?}", file_path))?;
        file.write_all(content)
            .with_context(|| format!("failed to write file {:?}", file_path))?;

        Ok(())
    }

    fn has_entries(dir_path: &Path) -> anyhow::Result<bool> {
        Ok(std::fs::read_dir(dir_path)
            .with_context(|| format!("failed to read directory {:?}", dir_path))?
            .next()
            .is_some())
    }
}
