//! Frontend `.env` file generation
//!
//! The frontend bundle only ever sees the whitelisted `FRONTEND_ENV_KEYS`;
//! deployment secrets stay out of it.

use crate::config::FRONTEND_ENV_KEYS;
use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

fn frontend_entries(variables: &BTreeMap<String, String>) -> Vec<(&'static str, &str)> {
    FRONTEND_ENV_KEYS
        .iter()
        .filter_map(|key| variables.get(*key).map(|value| (*key, value.as_str())))
        .collect()
}

/// Render the frontend variables as `KEY="value"` lines, in `FRONTEND_ENV_KEYS` order
pub fn render_frontend_env(variables: &BTreeMap<String, String>) -> String {
    frontend_entries(variables)
        .into_iter()
        .map(|(key, value)| format!("{}=\"{}\"\n", key, escape_value(value)))
        .collect()
}

/// Each value stays on one line
fn escape_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Write a fresh frontend env file; returns how many variables it holds
pub fn generate_frontend_env(path: &Path, variables: &BTreeMap<String, String>) -> Result<usize> {
    remove_frontend_env(path)?;

    let count = frontend_entries(variables).len();
    fs::write(path, render_frontend_env(variables))?;
    info!(path = %path.display(), count, "generated frontend env");
    Ok(count)
}

/// Delete the frontend env file; `false` if there was none
pub fn remove_frontend_env(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path)?;
    Ok(true)
}
