//! Image asset upload
//!
//! Object storage is reached through the `aws` CLI; this module only decides
//! which files go where.

use crate::config::Config;
use crate::domain::Environment;
use crate::error::{ReleaseError, Result};
use crate::process;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// Uploads files to a public bucket, one `aws s3 cp` per file
#[derive(Clone, PartialEq)]
pub struct AssetUploader {
    bucket: String,
    folder: Option<String>,
    region: String,
    access_key: String,
    secret_key: String,
}

impl AssetUploader {
    pub fn new(
        bucket: impl Into<String>,
        folder: Option<String>,
        region: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        AssetUploader {
            bucket: bucket.into(),
            folder: folder.filter(|f| !f.is_empty()),
            region: region.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Build an uploader from the `S3_*` variables of `env`
    pub fn from_config(config: &Config, env: Environment) -> Result<Self> {
        Ok(AssetUploader::new(
            config.require(env, "S3_IMAGE_BUCKET")?,
            config
                .variable(env, "S3_IMAGE_FOLDER")
                .map(|f| f.trim_matches('/').to_string()),
            config.require(env, "S3_REGION")?,
            config.require(env, "S3_ACCESS_KEY")?,
            config.require(env, "S3_SECRET_ACCESS_KEY")?,
        ))
    }

    /// Object key for `file`: `[folder/]basename`
    pub fn object_key(&self, file: &Path) -> Result<String> {
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ReleaseError::config(format!("Cannot derive object key from {}", file.display()))
            })?;

        Ok(match &self.folder {
            Some(folder) => format!("{}/{}", folder, name),
            None => name.to_string(),
        })
    }

    /// Public URL an uploaded object is served from
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }

    /// The `aws s3 cp` invocation for one file
    pub fn upload_command(&self, file: &Path, key: &str) -> Command {
        let mut cmd = Command::new("aws");
        cmd.arg("s3")
            .arg("cp")
            .arg(file)
            .arg(format!("s3://{}/{}", self.bucket, key))
            .args(["--acl", "public-read", "--region", self.region.as_str()])
            .env("AWS_ACCESS_KEY_ID", &self.access_key)
            .env("AWS_SECRET_ACCESS_KEY", &self.secret_key);
        cmd
    }

    /// Upload one file and return its public URL
    pub fn upload_file(&self, file: &Path) -> Result<String> {
        let key = self.object_key(file)?;
        process::run(self.upload_command(file, &key))?;
        let url = self.public_url(&key);
        info!(file = %file.display(), %url, "uploaded");
        Ok(url)
    }

    /// Upload every file in `dir`, stopping at the first failure
    pub fn upload_dir(&self, dir: &Path) -> Result<Vec<String>> {
        collect_files(dir)?
            .iter()
            .map(|file| self.upload_file(file))
            .collect()
    }
}

impl fmt::Debug for AssetUploader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetUploader")
            .field("bucket", &self.bucket)
            .field("folder", &self.folder)
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Regular files directly inside `dir`, sorted by name
pub fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
