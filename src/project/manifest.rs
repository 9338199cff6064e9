use crate::domain::SemanticVersion;
use crate::error::{ReleaseError, Result};
use crate::project::{read_file, VersionFile};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// The JavaScript `package.json` whose `version` field is the production source of truth
pub struct PackageManifest {
    path: PathBuf,
}

impl PackageManifest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PackageManifest { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>> {
        let text = read_file(&self.path)?;
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map),
            _ => Err(ReleaseError::project_file(format!(
                "{} is not a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl VersionFile for PackageManifest {
    fn read_version(&self) -> Result<SemanticVersion> {
        let manifest = self.load()?;
        manifest
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ReleaseError::project_file(format!(
                    "{} has no string \"version\" field",
                    self.path.display()
                ))
            })?
            .parse()
    }

    /// Key order and every other field are preserved
    fn write_version(&self, version: &SemanticVersion) -> Result<()> {
        let mut manifest = self.load()?;
        manifest.insert("version".to_string(), Value::String(version.to_string()));

        let mut text = serde_json::to_string_pretty(&Value::Object(manifest))?;
        text.push('\n');
        fs::write(&self.path, text)?;
        info!(path = %self.path.display(), %version, "updated manifest version");
        Ok(())
    }
}
