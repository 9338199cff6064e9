// tests/config_test.rs
use mobile_release::config::{load_config, Config, CONFIG_FILE_NAME};
use mobile_release::domain::Environment;
use mobile_release::ReleaseError;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

const CONFIG: &str = r#"
[project]
root = "app"
manifest = "package.json"

[environments.production]
IOS_PLIST_PATH = "ios/Example/Info.plist"
APP_BASE_URL = "https://api.example.com"

[environments.development]
APP_BASE_URL = "https://dev.example.com"
"#;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.project.root, PathBuf::from("."));
    assert_eq!(config.project.remote, "origin");
    assert_eq!(config.project.frontend_env, PathBuf::from(".env"));
    assert!(config.environments.is_empty());
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(CONFIG.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.project.root, PathBuf::from("app"));
    assert_eq!(
        config.variable(Environment::Production, "APP_BASE_URL"),
        Some("https://api.example.com")
    );
    assert_eq!(config.frontend_env_path(), PathBuf::from("app/.env"));
}

#[test]
fn test_load_missing_explicit_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = load_config(Some(missing.to_str().unwrap())).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
}

#[test]
fn test_load_rejects_unknown_environment() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[environments.qa]\nAPP_BASE_URL = \"x\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unknown environment: 'qa' (expected 'production' or 'development')"
    );
}

#[test]
#[serial]
fn test_load_from_working_directory() {
    let original_dir = env::current_dir().unwrap();
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), CONFIG).unwrap();

    env::set_current_dir(temp_dir.path()).unwrap();
    let result = load_config(None);
    env::set_current_dir(original_dir).unwrap();

    let config = result.unwrap();
    assert_eq!(config.project.root, PathBuf::from("app"));
    assert!(config.variables(Environment::Development).is_ok());
}
