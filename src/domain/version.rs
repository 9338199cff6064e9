use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
///
/// Field order matters: the derived ordering compares major, then minor,
/// then patch, numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// Version assumed when no release tags exist yet
pub const FLOOR_VERSION: SemanticVersion = SemanticVersion::new(0, 0, 1);

impl SemanticVersion {
    /// Create a new version
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
        }
    }

    /// `(major + 1).0.0`
    pub fn next_major(&self) -> Self {
        SemanticVersion::new(self.major + 1, 0, 0)
    }

    /// `major.(minor + 1).0`
    pub fn next_minor(&self) -> Self {
        SemanticVersion::new(self.major, self.minor + 1, 0)
    }

    /// Binary version a platform is reset to when the major changes
    pub fn major_baseline(&self) -> Self {
        SemanticVersion::new(self.major, 0, 0)
    }

    /// Convert a `semver` version, refusing pre-release and build metadata
    pub fn from_semver(version: &semver::Version) -> Result<Self> {
        if !version.pre.is_empty() || !version.build.is_empty() {
            return Err(ReleaseError::version(format!(
                "'{}' carries pre-release or build metadata",
                version
            )));
        }

        let component = |value: u64, name: &str| {
            u32::try_from(value).map_err(|_| {
                ReleaseError::version(format!("{} component too large in '{}'", name, version))
            })
        };

        Ok(SemanticVersion::new(
            component(version.major, "major")?,
            component(version.minor, "minor")?,
            component(version.patch, "patch")?,
        ))
    }
}

impl FromStr for SemanticVersion {
    type Err = ReleaseError;

    /// Parse a strict `X.Y.Z` version as found in project files
    fn from_str(s: &str) -> Result<Self> {
        let parsed = semver::Version::parse(s.trim()).map_err(|e| {
            ReleaseError::version(format!("Invalid version '{}': {}", s.trim(), e))
        })?;
        SemanticVersion::from_semver(&parsed)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Increment requested for a release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementKind {
    Major,
    Minor,
}

impl IncrementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncrementKind::Major => "major",
            IncrementKind::Minor => "minor",
        }
    }
}

impl fmt::Display for IncrementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v: SemanticVersion = "1.2.3".parse().unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
    }

    #[test]
    fn test_version_parse_trims_whitespace() {
        let v: SemanticVersion = " 4.0.12\n".parse().unwrap();
        assert_eq!(v, SemanticVersion::new(4, 0, 12));
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!("1.2".parse::<SemanticVersion>().is_err());
        assert!("1.2.3.4".parse::<SemanticVersion>().is_err());
        assert!("v1.2.3".parse::<SemanticVersion>().is_err());
    }

    #[test]
    fn test_version_parse_rejects_prerelease() {
        let err = "1.2.3-beta.1".parse::<SemanticVersion>().unwrap_err();
        assert!(err.to_string().contains("pre-release"));
    }

    #[test]
    fn test_ordering_is_numeric() {
        assert!(SemanticVersion::new(1, 10, 0) > SemanticVersion::new(1, 9, 0));
        assert!(SemanticVersion::new(2, 0, 0) > SemanticVersion::new(1, 99, 99));
        assert!(SemanticVersion::new(1, 2, 10) > SemanticVersion::new(1, 2, 9));
    }

    #[test]
    fn test_next_major() {
        let v = SemanticVersion::new(1, 2, 3);
        assert_eq!(v.next_major(), SemanticVersion::new(2, 0, 0));
        assert_eq!(v, SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_next_minor() {
        let v = SemanticVersion::new(1, 2, 3);
        assert_eq!(v.next_minor(), SemanticVersion::new(1, 3, 0));
    }

    #[test]
    fn test_major_baseline() {
        assert_eq!(
            SemanticVersion::new(3, 7, 1).major_baseline(),
            SemanticVersion::new(3, 0, 0)
        );
    }

    #[test]
    fn test_version_display() {
        assert_eq!(SemanticVersion::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(FLOOR_VERSION.to_string(), "0.0.1");
    }
}
