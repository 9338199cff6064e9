use crate::domain::SemanticVersion;
use crate::error::{ReleaseError, Result};
use crate::project::{read_capture, read_file, replace_first_capture, write_capture, VersionFile};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const VERSION_NAME: &str = r#"versionName\s+"(.*)""#;
const CODE_PUSH_KEY: &str =
    r#"<string\b[^>]*\bname="reactNativeCodePush_androidDeploymentKey"[^>]*>([^<]*)</string>"#;

/// `android/app/build.gradle`, versioned through `versionName "x.y.z"`
pub struct BuildGradle {
    path: PathBuf,
    version_name: Regex,
}

impl BuildGradle {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(BuildGradle {
            path: path.into(),
            version_name: Regex::new(VERSION_NAME)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VersionFile for BuildGradle {
    fn read_version(&self) -> Result<SemanticVersion> {
        read_capture(&self.path, &self.version_name)?.parse()
    }

    fn write_version(&self, version: &SemanticVersion) -> Result<()> {
        write_capture(&self.path, &self.version_name, &version.to_string())?;
        info!(path = %self.path.display(), %version, "updated Android versionName");
        Ok(())
    }
}

/// `res/values/strings.xml` of the Android app module
pub struct AndroidStrings {
    path: PathBuf,
    code_push_key: Regex,
}

impl AndroidStrings {
    /// Strings file inside the app module directory (`<app>/src/main/res/values/strings.xml`)
    pub fn in_app_module(app_dir: &Path) -> Result<Self> {
        Self::new(
            app_dir
                .join("src")
                .join("main")
                .join("res")
                .join("values")
                .join("strings.xml"),
        )
    }

    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(AndroidStrings {
            path: path.into(),
            code_push_key: Regex::new(CODE_PUSH_KEY)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the CodePush deployment key, returning the previous one
    pub fn set_code_push_deployment_key(&self, key: &str) -> Result<String> {
        let missing = || {
            ReleaseError::project_file(format!(
                "No reactNativeCodePush_androidDeploymentKey in {}",
                self.path.display()
            ))
        };

        let text = read_file(&self.path)?;
        let previous = self
            .code_push_key
            .captures(&text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(missing)?;
        let patched = replace_first_capture(&text, &self.code_push_key, &escape_xml(key))
            .ok_or_else(missing)?;

        fs::write(&self.path, patched)?;
        info!(path = %self.path.display(), "updated CodePush deployment key");
        Ok(previous)
    }
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
