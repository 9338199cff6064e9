//! Pure formatting functions for UI output.
//!
//! Styling goes through `console`, which drops colors when the stream is not
//! a terminal.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::{SemanticVersion, VersionPair};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().bold(), warning);
}

/// Show the version change a bump produces (or would produce, in a dry run)
pub fn display_version_change(current: &SemanticVersion, pair: &VersionPair) {
    println!("\n{}", style("Version Bump:").bold());
    println!("  From: {}", style(current).red());
    println!("  To:   {}", style(&pair.version).green());
    println!("  Tag:  {}", style(&pair.tag_name).cyan());
}

/// Show the command to publish a tag that was only created locally
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    println!(
        "\n{} To push this tag later, run:\n  {}",
        style("→").yellow(),
        style(render_push_command(tag, remote)).cyan()
    );
}

/// Print uploaded asset URLs, one per line
pub fn display_uploaded_urls(urls: &[String]) {
    for url in urls {
        println!("  {}", url);
    }
}

pub fn render_push_command(tag: &str, remote: &str) -> String {
    format!("git push {} refs/tags/{}", remote, tag)
}
