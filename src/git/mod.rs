//! Source-control operations abstraction layer
//!
//! Release logic only ever talks to the traits in this module. Two
//! implementations exist:
//!
//! - [system::SystemGit]: drives the system `git` binary as a subprocess
//! - [mock::MockGit]: in-memory double for tests
//!
//! ```rust
//! # use mobile_release::git::RemoteTagLister;
//! # fn example<L: RemoteTagLister>(lister: &L) -> mobile_release::Result<()> {
//! let listing = lister.list_remote_tags()?;
//! println!("{} remote tags", listing.lines().count());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod system;

pub use mock::MockGit;
pub use system::SystemGit;

use crate::error::Result;

/// Lists the tags published on the remote
pub trait RemoteTagLister: Send + Sync {
    /// Raw `git ls-remote --tags --refs` output
    ///
    /// One `<sha40>\trefs/tags/<name>` line per tag; interpretation is left
    /// to [crate::domain::TagLineParser].
    fn list_remote_tags(&self) -> Result<String>;
}

/// Working-tree and tag operations used during a release
///
/// Every method blocks until the underlying operation completes and fails
/// with [crate::error::ReleaseError::ProcessFailure] if it does not succeed.
pub trait SourceControl: Send + Sync {
    /// `true` when there is nothing to commit
    fn is_working_tree_clean(&self) -> Result<bool>;

    /// Stage everything and commit it with `message`
    fn commit_all(&self, message: &str) -> Result<()>;

    /// Create a lightweight tag on HEAD
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Push a single tag to the remote
    fn push_tag(&self, name: &str) -> Result<()>;

    /// Delete a local tag
    fn delete_tag(&self, name: &str) -> Result<()>;

    /// Delete a tag on the remote
    fn delete_remote_tag(&self, name: &str) -> Result<()>;

    /// Hard-reset the working tree to `hash`
    fn reset_hard(&self, hash: &str) -> Result<()>;

    /// Fetch from the default remote
    fn fetch(&self) -> Result<()>;
}
