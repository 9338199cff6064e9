use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mobile_release::config;
use mobile_release::ui;

mod cli;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = config::load_config(cli.config.as_deref())
        .map_err(anyhow::Error::from)
        .and_then(|config| cli::orchestration::execute(&cli.command, &config));

    if let Err(e) = result {
        debug!(error = ?e, "command failed");
        ui::display_error(&e.to_string());
        process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `debug` with `--verbose`, `warn` without
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed; the CLI works without logging
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
