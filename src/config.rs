use crate::domain::Environment;
use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "mobile-release.toml";

/// Variables copied into the frontend `.env` file
pub const FRONTEND_ENV_KEYS: [&str; 5] = [
    "APP_SENTRY_LINK",
    "APP_IOS_DOWNLOAD_URL",
    "APP_ANDROID_DOWNLOAD_URL",
    "APP_LAMBDA_BASE_URL",
    "APP_BASE_URL",
];

/// Variables consumed by the release tooling itself
pub const DEPLOYMENT_ENV_KEYS: [&str; 25] = [
    "IOS_PROJECT_FOLDER",
    "ANDROID_PROJECT_FOLDER",
    "IOS_APP_NAME",
    "IOS_PROJECT_FILE_PATH",
    "IOS_APP_IDENTIFIER",
    "IOS_PROJECT_SCHEME",
    "CODE_PUSH_IOS",
    "CODE_PUSH_ANDROID",
    "S3_ACCESS_KEY",
    "S3_SECRET_ACCESS_KEY",
    "S3_BUCKET",
    "S3_REGION",
    "S3_IMAGE_BUCKET",
    "S3_IMAGE_FOLDER",
    "S3_IOS_APP_DIR",
    "S3_ANDROID_APP_DIR",
    "IOS_PLIST_PATH",
    "ANDROID_BUILD_GRADLE_PATH",
    "APP_NAME",
    "ANDROID_APP_PATH",
    "ANDROID_APP_SUFFIX",
    "CODE_PUSH_ANDROID_DEPLOYMENT_KEY",
    "CODE_PUSH_IOS_DEPLOYMENT_KEY",
    "IOS_CERTIFICATE_REPOSITORY",
    "IOS_CERTIFICATE_USERNAME",
];

const DEFAULT_ANDROID_BUILD_GRADLE: &str = "android/app/build.gradle";

/// Every key an environment table may contain
pub fn allowed_env_keys() -> Vec<&'static str> {
    DEPLOYMENT_ENV_KEYS
        .iter()
        .chain(FRONTEND_ENV_KEYS.iter())
        .copied()
        .collect()
}

/// Represents the complete configuration for mobile-release.
///
/// Project layout defaults plus one table of deployment variables per environment.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub environments: BTreeMap<String, BTreeMap<String, String>>,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("package.json")
}

fn default_frontend_env() -> PathBuf {
    PathBuf::from(".env")
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

/// Location of the app and the files the release touches, relative to `root`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    #[serde(default = "default_frontend_env")]
    pub frontend_env: PathBuf,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            root: default_root(),
            manifest: default_manifest(),
            frontend_env: default_frontend_env(),
            remote: default_remote(),
            images_dir: default_images_dir(),
        }
    }
}

impl Config {
    /// Reject environment tables that do not name a known environment
    pub fn check_environments(&self) -> Result<()> {
        for name in self.environments.keys() {
            name.parse::<Environment>()?;
        }
        Ok(())
    }

    /// Deployment variables declared for `env`
    pub fn variables(&self, env: Environment) -> Result<&BTreeMap<String, String>> {
        self.environments.get(env.as_str()).ok_or_else(|| {
            ReleaseError::config(format!("No [environments.{}] table configured", env))
        })
    }

    /// A single variable; empty values count as unset
    pub fn variable(&self, env: Environment, key: &str) -> Option<&str> {
        self.environments
            .get(env.as_str())
            .and_then(|vars| vars.get(key))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Like [Config::variable], but missing values are an error
    pub fn require(&self, env: Environment, key: &str) -> Result<&str> {
        self.variable(env, key).ok_or_else(|| {
            ReleaseError::config(format!("{} is not set for environment '{}'", key, env))
        })
    }

    /// Frontend `.env` file, shared by every environment
    pub fn frontend_env_path(&self) -> PathBuf {
        self.project.root.join(&self.project.frontend_env)
    }

    /// Resolve every project path for `env` against the project root
    pub fn paths(&self, env: Environment) -> ProjectPaths {
        let root = &self.project.root;
        let from_var = |key: &str| self.variable(env, key).map(|p| root.join(p));

        ProjectPaths {
            environment: env,
            root: root.clone(),
            manifest: root.join(&self.project.manifest),
            frontend_env: self.frontend_env_path(),
            images_dir: root.join(&self.project.images_dir),
            android_gradle: from_var("ANDROID_BUILD_GRADLE_PATH")
                .unwrap_or_else(|| root.join(DEFAULT_ANDROID_BUILD_GRADLE)),
            ios_plist: from_var("IOS_PLIST_PATH"),
            ios_project: from_var("IOS_PROJECT_FILE_PATH"),
            android_app: from_var("ANDROID_APP_PATH"),
        }
    }
}

/// Concrete file locations handed to each project-file collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPaths {
    pub environment: Environment,
    pub root: PathBuf,
    pub manifest: PathBuf,
    pub frontend_env: PathBuf,
    pub images_dir: PathBuf,
    pub android_gradle: PathBuf,
    ios_plist: Option<PathBuf>,
    ios_project: Option<PathBuf>,
    android_app: Option<PathBuf>,
}

impl ProjectPaths {
    pub fn ios_plist(&self) -> Result<&Path> {
        self.required(&self.ios_plist, "IOS_PLIST_PATH")
    }

    pub fn ios_project(&self) -> Result<&Path> {
        self.required(&self.ios_project, "IOS_PROJECT_FILE_PATH")
    }

    pub fn android_app(&self) -> Result<&Path> {
        self.required(&self.android_app, "ANDROID_APP_PATH")
    }

    fn required<'a>(&self, path: &'a Option<PathBuf>, key: &str) -> Result<&'a Path> {
        path.as_deref().ok_or_else(|| {
            ReleaseError::config(format!(
                "{} is not set for environment '{}'",
                key, self.environment
            ))
        })
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `mobile-release.toml` in current directory
/// 3. `~/.config/.mobile-release.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or names an unknown environment
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        read_config_file(Path::new(path))?
    } else if local.exists() {
        read_config_file(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_path.exists() {
            read_config_file(&user_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse configuration text and validate its environment tables
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(config_str).map_err(|e| ReleaseError::config(e.to_string()))?;
    config.check_environments()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| ReleaseError::config(format!("Cannot read {}: {}", path.display(), e)))
}
