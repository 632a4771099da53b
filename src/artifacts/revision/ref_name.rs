use crate::artifacts::revision::INVALID_REF_NAME_REGEX;
use crate::errors::SprigError;
use anyhow::Context;

pub const HEADS_PREFIX: &str = "refs/heads/";
pub const TAGS_PREFIX: &str = "refs/tags/";

/// A reference name relative to the control directory, e.g. `refs/tags/v1.0`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct RefName(String);

impl RefName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            return Err(SprigError::InvalidRefName(name).into());
        }

        let re = regex::Regex::new(INVALID_REF_NAME_REGEX)
            .with_context(|| format!("invalid ref name regex: {INVALID_REF_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(SprigError::InvalidRefName(name).into())
        } else {
            Ok(Self(name))
        }
    }

    /// `refs/tags/<name>` for a short tag name
    pub fn tag(name: &str) -> anyhow::Result<Self> {
        Self::try_parse(format!("{TAGS_PREFIX}{name}"))
    }

    /// `refs/heads/<name>` for a short branch name
    pub fn branch(name: &str) -> anyhow::Result<Self> {
        Self::try_parse(format!("{HEADS_PREFIX}{name}"))
    }

    /// The name with `refs/tags/` or `refs/heads/` stripped
    pub fn short_name(&self) -> &str {
        self.0
            .strip_prefix(TAGS_PREFIX)
            .or_else(|| self.0.strip_prefix(HEADS_PREFIX))
            .unwrap_or(&self.0)
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
