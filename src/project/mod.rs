//! Version-bearing project files
//!
//! Each file format hides its own text-patching strategy behind
//! [VersionFile]; release logic never sees the underlying format.

pub mod android;
pub mod ios;
pub mod manifest;
pub mod mock;

pub use android::{AndroidStrings, BuildGradle};
pub use ios::{InfoPlist, XcodeProject};
pub use manifest::PackageManifest;
pub use mock::MemoryVersionFile;

use crate::domain::SemanticVersion;
use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

/// A file that records the app's version
pub trait VersionFile: Send + Sync {
    fn read_version(&self) -> Result<SemanticVersion>;

    fn write_version(&self, version: &SemanticVersion) -> Result<()>;
}

pub(crate) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        ReleaseError::project_file(format!("Cannot read {}: {}", path.display(), e))
    })
}

/// First capture group of `pattern` in the file at `path`
pub(crate) fn read_capture(path: &Path, pattern: &Regex) -> Result<String> {
    let text = read_file(path)?;
    pattern
        .captures(&text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            ReleaseError::project_file(format!(
                "No match for `{}` in {}",
                pattern.as_str(),
                path.display()
            ))
        })
}

/// Replace the first capture group of the first match of `pattern` with `value`
pub(crate) fn replace_first_capture(text: &str, pattern: &Regex, value: &str) -> Option<String> {
    let group = pattern.captures(text)?.get(1)?;
    let mut patched = String::with_capacity(text.len() + value.len());
    patched.push_str(&text[..group.start()]);
    patched.push_str(value);
    patched.push_str(&text[group.end()..]);
    Some(patched)
}

/// Rewrite the first capture group in the file at `path`, failing if it is absent
pub(crate) fn write_capture(path: &Path, pattern: &Regex, value: &str) -> Result<()> {
    let text = read_file(path)?;
    let patched = replace_first_capture(&text, pattern, value).ok_or_else(|| {
        ReleaseError::project_file(format!(
            "No match for `{}` in {}",
            pattern.as_str(),
            path.display()
        ))
    })?;
    fs::write(path, patched)?;
    Ok(())
}
