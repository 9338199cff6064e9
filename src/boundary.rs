use std::fmt;

use crate::domain::{Environment, SemanticVersion};

/// Non-fatal conditions hit while releasing.
/// These are reported to the user but never stop the release.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The remote has no tags for this environment yet
    NoReleaseTags { environment: Environment },
    /// Working tree was clean, so no commit was made
    NothingToCommit { message: String },
    /// Platform binaries moved to a new major line
    PlatformMajorReset {
        from: SemanticVersion,
        to: SemanticVersion,
    },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoReleaseTags { environment } => {
                write!(
                    f,
                    "No {} release tags found on the remote, starting from 0.0.1",
                    environment
                )
            }
            BoundaryWarning::NothingToCommit { message } => {
                write!(f, "Nothing to commit, skipped '{}'", message)
            }
            BoundaryWarning::PlatformMajorReset { from, to } => {
                write!(f, "iOS and Android versions reset from {} to {}", from, to)
            }
        }
    }
}
