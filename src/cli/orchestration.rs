//! Command handlers
//!
//! Each handler loads what it needs from the configuration, builds the
//! concrete collaborators and hands them to the library.

use anyhow::Result;

use mobile_release::assets::AssetUploader;
use mobile_release::config::{allowed_env_keys, Config};
use mobile_release::domain::{Environment, IncrementKind, VersionPair};
use mobile_release::frontend_env::{generate_frontend_env, remove_frontend_env};
use mobile_release::git::{SourceControl, SystemGit};
use mobile_release::orchestrator::{validate_config_keys, ReleaseOrchestrator};
use mobile_release::project::{AndroidStrings, BuildGradle, InfoPlist, PackageManifest, XcodeProject};
use mobile_release::ui;

use crate::cli::{Commands, EnvAction, TagAction};

/// Arguments of the `bump` command
#[derive(Debug, Clone, PartialEq)]
pub struct BumpArgs {
    pub environment: Environment,
    pub kind: IncrementKind,
    pub dry_run: bool,
    pub push: bool,
    pub force: bool,
}

pub fn execute(command: &Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Bump {
            env,
            kind,
            dry_run,
            no_push,
            force,
        } => run_bump(
            &BumpArgs {
                environment: env.parse()?,
                kind: (*kind).into(),
                dry_run: *dry_run,
                push: !*no_push,
                force: *force,
            },
            config,
        ),
        Commands::Current { env } => run_current(env.parse()?, config),
        Commands::Validate { env } => run_validate(env.parse()?, config),
        Commands::Env { action } => match action {
            EnvAction::Generate { env } => run_env_generate(env.parse()?, config),
            EnvAction::Clean => run_env_clean(config),
        },
        Commands::UploadAssets { env } => run_upload_assets(env.parse()?, config),
        Commands::CodepushKey { env, key } => run_codepush_key(env.parse()?, key, config),
        Commands::BundleId { env, app_id } => run_bundle_id(env.parse()?, app_id, config),
        Commands::Tag {
            action: TagAction::Delete { name, remote },
        } => run_tag_delete(name, *remote, config),
        Commands::Reset { hash } => {
            repository(config).reset_hard(hash)?;
            ui::display_success(&format!("Reset working tree to {}", hash));
            Ok(())
        }
        Commands::Fetch => {
            ui::display_status(&format!("Fetching from {}...", config.project.remote));
            repository(config).fetch()?;
            ui::display_success("Fetched latest data from remote");
            Ok(())
        }
    }
}

fn repository(config: &Config) -> SystemGit {
    SystemGit::new(&config.project.root, &config.project.remote)
}

fn run_bump(args: &BumpArgs, config: &Config) -> Result<()> {
    let env = args.environment;
    let paths = config.paths(env);
    let git = repository(config);
    let manifest = PackageManifest::new(&paths.manifest);
    let orchestrator = ReleaseOrchestrator::new(&git, &git, &manifest)?;

    ui::display_status(&format!(
        "Listing {} tags on {}...",
        env, config.project.remote
    ));
    let resolution = orchestrator.resolve(env)?;
    if let Some(warning) = resolution.warning() {
        ui::display_boundary_warning(&warning);
    }

    let next = resolution.next(args.kind);
    let preview = VersionPair {
        version: next,
        tag_name: env.tag_name(&next),
    };
    ui::display_version_change(&resolution.current, &preview);

    if args.dry_run {
        ui::display_status("Dry run: no files, commits or tags were changed");
        return Ok(());
    }

    if !args.force && !ui::confirm_action("Proceed with this release?")? {
        println!("Operation cancelled by user.");
        return Ok(());
    }

    // Resolve platform paths up front so a missing variable fails before any write
    let ios = InfoPlist::new(paths.ios_plist()?)?;
    let android = BuildGradle::new(&paths.android_gradle)?;

    let (pair, outcome) = orchestrator.release(&resolution, args.kind, &ios, &android)?;
    for warning in outcome.warnings() {
        ui::display_boundary_warning(&warning);
    }
    if outcome.committed {
        ui::display_success(&format!("Committed '{}'", outcome.commit_message));
    }

    orchestrator.publish_tag(&pair, args.push)?;
    if args.push {
        ui::display_success(&format!(
            "Published tag {} to {}",
            pair.tag_name, config.project.remote
        ));
    } else {
        ui::display_success(&format!("Created tag {} locally", pair.tag_name));
        ui::display_manual_push_instruction(&pair.tag_name, &config.project.remote);
    }
    Ok(())
}

fn run_current(env: Environment, config: &Config) -> Result<()> {
    let paths = config.paths(env);
    let git = repository(config);
    let manifest = PackageManifest::new(&paths.manifest);
    let orchestrator = ReleaseOrchestrator::new(&git, &git, &manifest)?;

    let resolution = orchestrator.resolve(env)?;
    if let Some(warning) = resolution.warning() {
        ui::display_boundary_warning(&warning);
    }
    println!("{}", resolution.current);
    Ok(())
}

fn run_validate(env: Environment, config: &Config) -> Result<()> {
    let variables = config.variables(env)?;
    validate_config_keys(variables.keys().map(String::as_str), &allowed_env_keys())?;
    ui::display_success(&format!(
        "{} variables for {} are all supported",
        variables.len(),
        env
    ));
    Ok(())
}

fn run_env_generate(env: Environment, config: &Config) -> Result<()> {
    let path = config.frontend_env_path();
    let count = generate_frontend_env(&path, config.variables(env)?)?;
    ui::display_success(&format!(
        "Wrote {} variables to {}",
        count,
        path.display()
    ));
    Ok(())
}

fn run_env_clean(config: &Config) -> Result<()> {
    let path = config.frontend_env_path();
    if remove_frontend_env(&path)? {
        ui::display_success(&format!("Removed {}", path.display()));
    } else {
        ui::display_status(&format!("{} does not exist", path.display()));
    }
    Ok(())
}

fn run_upload_assets(env: Environment, config: &Config) -> Result<()> {
    let uploader = AssetUploader::from_config(config, env)?;
    let images_dir = config.paths(env).images_dir;

    ui::display_status(&format!("Uploading {}...", images_dir.display()));
    let urls = uploader.upload_dir(&images_dir)?;
    ui::display_success(&format!("Uploaded {} files", urls.len()));
    ui::display_uploaded_urls(&urls);
    Ok(())
}

fn run_codepush_key(env: Environment, key: &str, config: &Config) -> Result<()> {
    let paths = config.paths(env);
    let strings = AndroidStrings::in_app_module(paths.android_app()?)?;
    strings.set_code_push_deployment_key(key)?;
    ui::display_success(&format!(
        "Updated CodePush deployment key in {}",
        strings.path().display()
    ));
    Ok(())
}

fn run_bundle_id(env: Environment, app_id: &str, config: &Config) -> Result<()> {
    let paths = config.paths(env);
    let project = XcodeProject::new(paths.ios_project()?)?;
    let count = project.set_bundle_identifier(app_id)?;
    ui::display_success(&format!(
        "Set bundle identifier {} on {} build configurations",
        app_id, count
    ));
    Ok(())
}

fn run_tag_delete(name: &str, remote: bool, config: &Config) -> Result<()> {
    let git = repository(config);
    git.delete_tag(name)?;
    ui::display_success(&format!("Deleted local tag {}", name));

    if remote {
        git.delete_remote_tag(name)?;
        ui::display_success(&format!(
            "Deleted tag {} on {}",
            name, config.project.remote
        ));
    }
    Ok(())
}
