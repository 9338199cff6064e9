use crate::domain::SemanticVersion;
use crate::error::{ReleaseError, Result};
use crate::project::{read_capture, read_file, write_capture, VersionFile};
use regex::{NoExpand, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const SHORT_VERSION: &str =
    r"<key>CFBundleShortVersionString</key>\s*<string>([^<]*)</string>";
const BUNDLE_IDENTIFIER: &str = r"PRODUCT_BUNDLE_IDENTIFIER = .*;";

/// The app target's `Info.plist`, versioned through `CFBundleShortVersionString`
pub struct InfoPlist {
    path: PathBuf,
    short_version: Regex,
}

impl InfoPlist {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(InfoPlist {
            path: path.into(),
            short_version: Regex::new(SHORT_VERSION)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VersionFile for InfoPlist {
    fn read_version(&self) -> Result<SemanticVersion> {
        read_capture(&self.path, &self.short_version)?.parse()
    }

    fn write_version(&self, version: &SemanticVersion) -> Result<()> {
        write_capture(&self.path, &self.short_version, &version.to_string())?;
        info!(path = %self.path.display(), %version, "updated iOS CFBundleShortVersionString");
        Ok(())
    }
}

/// An `.xcodeproj` bundle
pub struct XcodeProject {
    pbxproj: PathBuf,
    bundle_identifier: Regex,
}

impl XcodeProject {
    /// `project_dir` is the `.xcodeproj` directory itself
    pub fn new(project_dir: &Path) -> Result<Self> {
        Ok(XcodeProject {
            pbxproj: project_dir.join("project.pbxproj"),
            bundle_identifier: Regex::new(BUNDLE_IDENTIFIER)?,
        })
    }

    pub fn pbxproj(&self) -> &Path {
        &self.pbxproj
    }

    /// Point every build configuration at `app_id`; returns how many were rewritten
    pub fn set_bundle_identifier(&self, app_id: &str) -> Result<usize> {
        let text = read_file(&self.pbxproj)?;
        let count = self.bundle_identifier.find_iter(&text).count();
        if count == 0 {
            return Err(ReleaseError::project_file(format!(
                "No PRODUCT_BUNDLE_IDENTIFIER in {}",
                self.pbxproj.display()
            )));
        }

        let replacement = format!("PRODUCT_BUNDLE_IDENTIFIER = {};", app_id);
        let patched = self
            .bundle_identifier
            .replace_all(&text, NoExpand(&replacement));
        fs::write(&self.pbxproj, patched.as_bytes())?;
        info!(path = %self.pbxproj.display(), app_id, count, "updated bundle identifier");
        Ok(count)
    }
}
