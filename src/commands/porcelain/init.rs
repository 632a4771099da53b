use crate::areas::config::Config;
use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::revision::ref_name::RefName;
use anyhow::Context;
use std::fs;
use std::io::Write;

const DEFAULT_BRANCH: &str = "master";
const DEFAULT_DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

impl Repository {
    /// Create the control directory layout; files that already exist are kept
    pub fn init(&self) -> anyhow::Result<()> {
        if self.path().exists() && !self.path().is_dir() {
            anyhow::bail!("{} is not a directory", self.path().display());
        }

        for dir in ["branches", "refs/tags", "refs/heads"] {
            fs::create_dir_all(self.git_path(dir))
                .with_context(|| format!("Failed to create .git/{} directory", dir))?;
        }
        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .git/objects directory")?;

        let description_path = self.git_path("description");
        if !description_path.exists() {
            fs::write(&description_path, DEFAULT_DESCRIPTION)
                .context("Failed to create .git/description file")?;
        }

        if !self.refs().head_path().exists() {
            self.refs()
                .write_symbolic_ref(
                    &RefName::try_parse(HEAD_REF_NAME.to_string())?,
                    &RefName::branch(DEFAULT_BRANCH)?,
                )
                .context("Failed to create initial HEAD reference")?;
        }

        let config_path = self.git_path("config");
        if !config_path.exists() {
            Config::default()
                .save(&config_path)
                .context("Failed to create .git/config file")?;
        }

        writeln!(
            self.writer(),
            "Initialized empty Git repository in {}",
            self.git_dir().display()
        )?;

        Ok(())
    }
}
