use std::fs;
use std::path::Path;

use mobile_release::config::parse_config;
use mobile_release::domain::{Environment, IncrementKind};
use mobile_release::frontend_env::generate_frontend_env;
use mobile_release::git::MockGit;
use mobile_release::orchestrator::ReleaseOrchestrator;
use mobile_release::project::{BuildGradle, InfoPlist, PackageManifest};
use tempfile::TempDir;

const PACKAGE_JSON: &str = r#"{
  "name": "example-app",
  "version": "1.3.0",
  "private": true
}
"#;

const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
	<key>CFBundleShortVersionString</key>
	<string>1.0.0</string>
	<key>CFBundleVersion</key>
	<string>42</string>
</dict>
</plist>
"#;

const BUILD_GRADLE: &str = r#"android {
    defaultConfig {
        versionCode 42
        versionName "1.0.0"
    }
}
"#;

fn write(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn app_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "package.json", PACKAGE_JSON);
    write(dir.path(), "ios/Example/Info.plist", INFO_PLIST);
    write(dir.path(), "android/app/build.gradle", BUILD_GRADLE);
    dir
}

fn config_for(dir: &TempDir) -> mobile_release::config::Config {
    parse_config(&format!(
        r#"
[project]
root = "{}"

[environments.production]
IOS_PLIST_PATH = "ios/Example/Info.plist"
APP_BASE_URL = "https://api.example.com"
S3_SECRET_ACCESS_KEY = "secret"
"#,
        dir.path().display()
    ))
    .unwrap()
}

#[test]
fn test_production_major_release_on_disk() {
    let dir = app_fixture();
    let config = config_for(&dir);
    let paths = config.paths(Environment::Production);

    let git = MockGit::new().with_remote_tags(&["1.3.0", "development-1.8.0"]);
    let manifest = PackageManifest::new(&paths.manifest);
    let ios = InfoPlist::new(paths.ios_plist().unwrap()).unwrap();
    let android = BuildGradle::new(&paths.android_gradle).unwrap();
    let orchestrator = ReleaseOrchestrator::new(&git, &git, &manifest).unwrap();

    let pair = orchestrator
        .increment(Environment::Production, IncrementKind::Major)
        .unwrap();
    assert_eq!(pair.tag_name, "2.0.0");

    // Writing the manifest dirties the tree
    git.set_clean(false);
    let outcome = orchestrator
        .reconcile_platform_versions(&pair.version, &ios, &android)
        .unwrap();
    assert!(outcome.committed);
    orchestrator.publish_tag(&pair, true).unwrap();

    assert_eq!(
        fs::read_to_string(&paths.manifest).unwrap(),
        PACKAGE_JSON.replace("1.3.0", "2.0.0")
    );
    assert_eq!(
        fs::read_to_string(paths.ios_plist().unwrap()).unwrap(),
        INFO_PLIST.replace("<string>1.0.0</string>", "<string>2.0.0</string>")
    );
    assert_eq!(
        fs::read_to_string(&paths.android_gradle).unwrap(),
        BUILD_GRADLE.replace("\"1.0.0\"", "\"2.0.0\"")
    );
    assert_eq!(
        git.calls(),
        vec![
            "status --porcelain",
            "commit -m Version Bump (v2.0.0)",
            "tag 2.0.0",
            "push origin refs/tags/2.0.0",
        ]
    );
}

#[test]
fn test_minor_release_leaves_platform_files_alone() {
    let dir = app_fixture();
    let config = config_for(&dir);
    let paths = config.paths(Environment::Production);

    let git = MockGit::new().with_remote_tags(&["1.0.0"]);
    let manifest = PackageManifest::new(&paths.manifest);
    let ios = InfoPlist::new(paths.ios_plist().unwrap()).unwrap();
    let android = BuildGradle::new(&paths.android_gradle).unwrap();
    let orchestrator = ReleaseOrchestrator::new(&git, &git, &manifest).unwrap();

    let pair = orchestrator
        .increment(Environment::Production, IncrementKind::Minor)
        .unwrap();
    assert_eq!(pair.tag_name, "1.1.0");

    let outcome = orchestrator
        .reconcile_platform_versions(&pair.version, &ios, &android)
        .unwrap();
    assert_eq!(outcome.platforms_reset_to, None);
    assert_eq!(
        fs::read_to_string(paths.ios_plist().unwrap()).unwrap(),
        INFO_PLIST
    );
    assert_eq!(fs::read_to_string(&paths.android_gradle).unwrap(), BUILD_GRADLE);
}

#[test]
fn test_development_release_leaves_manifest_untouched() {
    let dir = app_fixture();
    let config = config_for(&dir);
    let paths = config.paths(Environment::Development);

    let git = MockGit::new().with_remote_tags(&["1.3.0", "development-1.8.0"]);
    let manifest = PackageManifest::new(&paths.manifest);
    let orchestrator = ReleaseOrchestrator::new(&git, &git, &manifest).unwrap();

    let pair = orchestrator
        .increment(Environment::Development, IncrementKind::Minor)
        .unwrap();

    assert_eq!(pair.tag_name, "development-1.9.0");
    assert_eq!(fs::read_to_string(&paths.manifest).unwrap(), PACKAGE_JSON);
}

#[test]
fn test_frontend_env_excludes_deployment_secrets() {
    let dir = app_fixture();
    let config = config_for(&dir);
    let path = config.frontend_env_path();

    let count = generate_frontend_env(
        &path,
        config.variables(Environment::Production).unwrap(),
    )
    .unwrap();

    assert_eq!(count, 1);
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, "APP_BASE_URL=\"https://api.example.com\"\n");
    assert!(!written.contains("secret"));
}

#[test]
fn test_platform_mismatch_leaves_package_json_untouched() {
    let dir = app_fixture();
    write(
        dir.path(),
        "android/app/build.gradle",
        &BUILD_GRADLE.replace("\"1.0.0\"", "\"1.1.0\""),
    );
    let config = config_for(&dir);
    let paths = config.paths(Environment::Production);

    let git = MockGit::new().with_remote_tags(&["1.3.0"]);
    let manifest = PackageManifest::new(&paths.manifest);
    let ios = InfoPlist::new(paths.ios_plist().unwrap()).unwrap();
    let android = BuildGradle::new(&paths.android_gradle).unwrap();
    let orchestrator = ReleaseOrchestrator::new(&git, &git, &manifest).unwrap();

    let resolution = orchestrator.resolve(Environment::Production).unwrap();
    let err = orchestrator
        .release(&resolution, IncrementKind::Minor, &ios, &android)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "iOS and Android versions should match (iOS: 1.0.0, Android: 1.1.0)"
    );
    assert_eq!(fs::read_to_string(&paths.manifest).unwrap(), PACKAGE_JSON);
    assert!(git.calls().is_empty());
}
