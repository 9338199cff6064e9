use crate::domain::SemanticVersion;
use crate::error::ReleaseError;
use std::fmt;
use std::str::FromStr;

/// Prefix carried by every development release tag
pub const DEVELOPMENT_TAG_PREFIX: &str = "development-";

/// Deployment environment a release is cut for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    pub const ALL: [Environment; 2] = [Environment::Production, Environment::Development];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Development => "development",
        }
    }

    /// Tag name under which `version` is recorded for this environment
    pub fn tag_name(&self, version: &SemanticVersion) -> String {
        match self {
            Environment::Production => version.to_string(),
            Environment::Development => format!("{}{}", DEVELOPMENT_TAG_PREFIX, version),
        }
    }
}

impl FromStr for Environment {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Environment::Production),
            "development" => Ok(Environment::Development),
            other => Err(ReleaseError::UnknownEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
