use crate::domain::{Environment, SemanticVersion};
use crate::error::Result;
use regex::{Captures, Regex};

// ASCII digits only; `\d` in `regex` also matches other Unicode digits
const PRODUCTION_TAG_NAME: &str = r"^([0-9]{0,3})\.([0-9]{0,3})\.([0-9]{0,3})$";
const DEVELOPMENT_TAG_NAME: &str = r"^development-([0-9]{0,3})\.([0-9]{0,3})\.([0-9]{0,3})$";

/// Sorts release tags into production and development versions
///
/// Both environments share one tag namespace; each only sees the tags
/// that follow its own naming convention.
#[derive(Debug, Clone)]
pub struct VersionClassifier {
    production: Regex,
    development: Regex,
}

impl VersionClassifier {
    pub fn new() -> Result<Self> {
        Ok(VersionClassifier {
            production: Regex::new(PRODUCTION_TAG_NAME)?,
            development: Regex::new(DEVELOPMENT_TAG_NAME)?,
        })
    }

    fn pattern(&self, env: Environment) -> &Regex {
        match env {
            Environment::Production => &self.production,
            Environment::Development => &self.development,
        }
    }

    /// Versions of the tags that belong to `env`, in input order
    ///
    /// Tags following the other environment's convention (or no convention
    /// at all) are dropped silently.
    pub fn classify<S: AsRef<str>>(&self, tag_names: &[S], env: Environment) -> Vec<SemanticVersion> {
        let pattern = self.pattern(env);
        tag_names
            .iter()
            .filter_map(|name| pattern.captures(name.as_ref()))
            .map(|captures| version_from_captures(&captures))
            .collect()
    }
}

fn version_from_captures(captures: &Captures<'_>) -> SemanticVersion {
    SemanticVersion::new(
        component(captures, 1),
        component(captures, 2),
        component(captures, 3),
    )
}

/// At most three ASCII digits, so only the empty group can fail to parse; it counts as 0.
fn component(captures: &Captures<'_>, index: usize) -> u32 {
    captures
        .get(index)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0)
}
