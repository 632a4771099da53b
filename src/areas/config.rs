//! Repository configuration (`.git/config`)
//!
//! ## Format
//!
//! ```text
//! [core]
//! repositoryformatversion=0
//! filemode=false
//! bare=false
//! ```

use crate::errors::SprigError;
use anyhow::Context;
use ini::Ini;
use std::path::Path;

pub const CORE_SECTION: &str = "core";
pub const FORMAT_VERSION_KEY: &str = "repositoryformatversion";
pub const FILEMODE_KEY: &str = "filemode";
pub const BARE_KEY: &str = "bare";

/// The only repository format this crate understands
pub const SUPPORTED_FORMAT_VERSION: i64 = 0;

pub struct Config {
    ini: Ini,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config").finish_non_exhaustive()
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut config = Config { ini: Ini::new() };
        config.set(CORE_SECTION, FORMAT_VERSION_KEY, SUPPORTED_FORMAT_VERSION);
        config.set(CORE_SECTION, FILEMODE_KEY, false);
        config.set(CORE_SECTION, BARE_KEY, false);

        config
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            return Err(SprigError::MissingConfig(path.to_path_buf()).into());
        }

        let ini = Ini::load_from_file(path)
            .with_context(|| format!("failed to parse config file at {:?}", path))?;

        Ok(Config { ini })
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        self.ini
            .write_to_file(path)
            .with_context(|| format!("failed to write config file at {:?}", path))
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.ini.get_from(Some(section), key)
    }

    pub fn get_int(&self, section: &str, key: &str) -> anyhow::Result<Option<i64>> {
        self.get(section, key)
            .map(|value| {
                value
                    .trim()
                    .parse::<i64>()
                    .with_context(|| format!("{section}.{key} is not an integer: {value}"))
            })
            .transpose()
    }

    pub fn get_bool(&self, section: &str, key: &str) -> anyhow::Result<Option<bool>> {
        self.get(section, key)
            .map(|value| match value.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(true),
                "false" | "no" | "off" | "0" => Ok(false),
                _ => anyhow::bail!("{section}.{key} is not a boolean: {value}"),
            })
            .transpose()
    }

    pub fn set(&mut self, section: &str, key: &str, value: impl ToString) {
        self.ini
            .with_section(Some(section))
            .set(key, value.to_string());
    }

    /// Fails unless `core.repositoryformatversion` is present and supported
    pub fn check_format_version(&self) -> anyhow::Result<()> {
        let raw = self.get(CORE_SECTION, FORMAT_VERSION_KEY).unwrap_or_default();

        match raw.trim().parse::<i64>() {
            Ok(SUPPORTED_FORMAT_VERSION) => Ok(()),
            _ => Err(SprigError::UnsupportedRepositoryFormat(raw.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config");

        Config::default().save(&path).unwrap();
        let config = Config::load(&path).unwrap();

        assert_eq!(config.get_int(CORE_SECTION, FORMAT_VERSION_KEY).unwrap(), Some(0));
        assert_eq!(config.get_bool(CORE_SECTION, FILEMODE_KEY).unwrap(), Some(false));
        assert_eq!(config.get_bool(CORE_SECTION, BARE_KEY).unwrap(), Some(false));
        assert!(config.check_format_version().is_ok());
    }

    #[test]
    fn unknown_format_version_is_rejected() {
        let mut config = Config::default();
        config.set(CORE_SECTION, FORMAT_VERSION_KEY, 1);

        let err = config.check_format_version().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SprigError>(),
            Some(SprigError::UnsupportedRepositoryFormat(version)) if version == "1"
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();

        let err = Config::load(&dir.path().join("config")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SprigError>(),
            Some(SprigError::MissingConfig(_))
        ));
    }

    #[test]
    fn typed_lookups_reject_garbage() {
        let mut config = Config::default();
        config.set("user", "name", "A U Thor");

        assert!(config.get_int("user", "name").is_err());
        assert!(config.get_bool("user", "name").is_err());
        assert_eq!(config.get_int("user", "missing").unwrap(), None);
        assert_eq!(config.get("user", "name"), Some("A U Thor"));
    }
}
