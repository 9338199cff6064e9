use thiserror::Error;

use crate::domain::SemanticVersion;

/// Unified error type for mobile-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Invalid format of git ls-remote at line {line_index}\nline: {content}")]
    MalformedTagLine { line_index: usize, content: String },

    #[error("Unknown environment: '{0}' (expected 'production' or 'development')")]
    UnknownEnvironment(String),

    #[error("iOS and Android versions should match (iOS: {primary}, Android: {secondary})")]
    PlatformVersionMismatch {
        primary: SemanticVersion,
        secondary: SemanticVersion,
    },

    #[error("Invalid vars supplied, {}", .0.join(", "))]
    UnsupportedConfigKeys(Vec<String>),

    #[error("Command `{command}` failed with status {}{}", exit_status_label(.exit_status), stderr_suffix(.stderr))]
    ProcessFailure {
        command: String,
        exit_status: Option<i32>,
        stderr: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Project file error: {0}")]
    ProjectFile(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Manifest is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in mobile-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

fn exit_status_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "unknown".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a project file error with context
    pub fn project_file(msg: impl Into<String>) -> Self {
        ReleaseError::ProjectFile(msg.into())
    }
}
