//! Command-line surface of `mobile-release`

pub mod orchestration;

use clap::{Parser, Subcommand, ValueEnum};

use mobile_release::domain::IncrementKind;

#[derive(Parser)]
#[command(
    name = "mobile-release",
    version,
    about = "Version, tag and prepare React Native mobile releases"
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Log pipeline steps at debug level")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bump the version, reconcile platform binaries and tag the release
    Bump {
        #[arg(short, long, help = "production or development")]
        env: String,

        #[arg(short, long, value_enum)]
        kind: KindArg,

        #[arg(long, help = "Preview the next version without making changes")]
        dry_run: bool,

        #[arg(long, help = "Create the tag locally but do not push it")]
        no_push: bool,

        #[arg(short, long, help = "Skip confirmation prompts")]
        force: bool,
    },

    /// Print the current version of an environment
    Current {
        #[arg(short, long)]
        env: String,
    },

    /// Check an environment's variables against the supported keys
    Validate {
        #[arg(short, long)]
        env: String,
    },

    /// Manage the frontend .env file
    Env {
        #[command(subcommand)]
        action: EnvAction,
    },

    /// Upload the images directory to the asset bucket
    UploadAssets {
        #[arg(short, long)]
        env: String,
    },

    /// Set the Android CodePush deployment key
    CodepushKey {
        #[arg(short, long)]
        env: String,

        #[arg(long)]
        key: String,
    },

    /// Set the iOS bundle identifier on every build configuration
    BundleId {
        #[arg(short, long)]
        env: String,

        #[arg(long)]
        app_id: String,
    },

    /// Tag maintenance
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },

    /// Hard-reset the working tree to a commit
    Reset { hash: String },

    /// Fetch from the remote
    Fetch,
}

#[derive(Subcommand)]
pub enum EnvAction {
    /// Regenerate the frontend .env from an environment's variables
    Generate {
        #[arg(short, long)]
        env: String,
    },
    /// Remove the frontend .env
    Clean,
}

#[derive(Subcommand)]
pub enum TagAction {
    /// Delete a tag locally, and optionally on the remote
    Delete {
        name: String,

        #[arg(long, help = "Also delete the tag on the remote")]
        remote: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Major,
    Minor,
}

impl From<KindArg> for IncrementKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Major => IncrementKind::Major,
            KindArg::Minor => IncrementKind::Minor,
        }
    }
}
