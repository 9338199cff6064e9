//! Version resolution and release policy

use crate::domain::{Environment, IncrementKind, SemanticVersion, FLOOR_VERSION};
use crate::error::Result;
use crate::project::VersionFile;

/// Outcome of a version bump: the new version and the tag that records it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPair {
    pub version: SemanticVersion,
    pub tag_name: String,
}

/// Current version among `versions`, or [`FLOOR_VERSION`] when there are none
pub fn resolve_current(versions: &[SemanticVersion]) -> SemanticVersion {
    versions.iter().copied().max().unwrap_or(FLOOR_VERSION)
}

/// Next version for the requested increment; patch always resets to 0
pub fn bump(current: SemanticVersion, kind: IncrementKind) -> SemanticVersion {
    match kind {
        IncrementKind::Major => current.next_major(),
        IncrementKind::Minor => current.next_minor(),
    }
}

/// Record `new_version` for `env` and return the tag name to publish
///
/// Production versions are written to the manifest as well as tagged.
/// Development versions live only in their tag; the manifest is left alone.
pub fn externalize(
    new_version: SemanticVersion,
    env: Environment,
    manifest: &dyn VersionFile,
) -> Result<VersionPair> {
    if env == Environment::Production {
        manifest.write_version(&new_version)?;
    }

    Ok(VersionPair {
        version: new_version,
        tag_name: env.tag_name(&new_version),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::MemoryVersionFile;

    #[test]
    fn test_resolve_current_empty_is_floor() {
        assert_eq!(resolve_current(&[]), SemanticVersion::new(0, 0, 1));
    }

    #[test]
    fn test_resolve_current_picks_maximum() {
        let versions = [
            SemanticVersion::new(1, 9, 0),
            SemanticVersion::new(1, 10, 0),
            SemanticVersion::new(1, 2, 7),
        ];
        assert_eq!(resolve_current(&versions), SemanticVersion::new(1, 10, 0));
    }

    #[test]
    fn test_resolve_current_with_duplicates() {
        let versions = [
            SemanticVersion::new(2, 0, 0),
            SemanticVersion::new(2, 0, 0),
            SemanticVersion::new(1, 0, 0),
        ];
        assert_eq!(resolve_current(&versions), SemanticVersion::new(2, 0, 0));
    }

    #[test]
    fn test_resolve_current_below_floor() {
        // An explicit 0.0.0 tag wins over nothing but is still the maximum present.
        let versions = [SemanticVersion::new(0, 0, 0)];
        assert_eq!(resolve_current(&versions), SemanticVersion::new(0, 0, 0));
    }

    #[test]
    fn test_bump_major_ignores_minor_and_patch() {
        let v = SemanticVersion::new(1, 7, 3);
        assert_eq!(bump(v, IncrementKind::Major), SemanticVersion::new(2, 0, 0));
    }

    #[test]
    fn test_bump_minor_resets_patch() {
        let v = SemanticVersion::new(1, 7, 3);
        assert_eq!(bump(v, IncrementKind::Minor), SemanticVersion::new(1, 8, 0));
    }

    #[test]
    fn test_externalize_production_writes_manifest_once() {
        let manifest = MemoryVersionFile::new(SemanticVersion::new(1, 3, 0));
        let pair = externalize(
            SemanticVersion::new(1, 4, 0),
            Environment::Production,
            &manifest,
        )
        .unwrap();

        assert_eq!(pair.tag_name, "1.4.0");
        assert_eq!(pair.version, SemanticVersion::new(1, 4, 0));
        assert_eq!(manifest.writes(), vec![SemanticVersion::new(1, 4, 0)]);
    }

    #[test]
    fn test_externalize_development_never_writes_manifest() {
        let manifest = MemoryVersionFile::new(SemanticVersion::new(1, 3, 0));
        let pair = externalize(
            SemanticVersion::new(1, 0, 0),
            Environment::Development,
            &manifest,
        )
        .unwrap();

        assert_eq!(pair.tag_name, "development-1.0.0");
        assert!(manifest.writes().is_empty());
        assert_eq!(manifest.read_version().unwrap(), SemanticVersion::new(1, 3, 0));
    }
}
