use crate::error::{ReleaseError, Result};
use std::process::Command;
use tracing::debug;

/// Render a command as a shell-like line for logs and errors
pub fn command_line(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a command to completion and return its stdout
///
/// Blocks until the process exits. A non-zero exit, or a failure to spawn,
/// is reported as [`ReleaseError::ProcessFailure`].
pub fn run(mut command: Command) -> Result<String> {
    let line = command_line(&command);
    debug!(command = %line, "running");

    let output = command.output().map_err(|e| ReleaseError::ProcessFailure {
        command: line.clone(),
        exit_status: None,
        stderr: e.to_string(),
    })?;

    if !output.status.success() {
        return Err(ReleaseError::ProcessFailure {
            command: line,
            exit_status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
