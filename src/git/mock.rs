use crate::error::{ReleaseError, Result};
use crate::git::{RemoteTagLister, SourceControl};
use std::sync::Mutex;

const MOCK_SHA: &str = "0123456789abcdef0123456789abcdef01234567";

/// Mock repository for testing without actual git operations
///
/// Records every mutating call as a git-like command string so tests can
/// assert on exactly what would have run.
pub struct MockGit {
    listing: String,
    clean: Mutex<bool>,
    calls: Mutex<Vec<String>>,
    fail_remote_listing: bool,
}

impl MockGit {
    /// Create a new mock with no remote tags and a clean working tree
    pub fn new() -> Self {
        MockGit {
            listing: String::new(),
            clean: Mutex::new(true),
            calls: Mutex::new(Vec::new()),
            fail_remote_listing: false,
        }
    }

    /// Remote publishes exactly these tags, in this order
    pub fn with_remote_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        self.listing = tags
            .iter()
            .map(|tag| format!("{}\trefs/tags/{}\n", MOCK_SHA, tag.as_ref()))
            .collect();
        self
    }

    /// Remote returns this listing verbatim
    pub fn with_raw_listing(mut self, listing: impl Into<String>) -> Self {
        self.listing = listing.into();
        self
    }

    /// `git ls-remote` exits non-zero
    pub fn with_failing_remote(mut self) -> Self {
        self.fail_remote_listing = true;
        self
    }

    /// Mark the working tree as having uncommitted changes
    pub fn with_dirty_tree(self) -> Self {
        self.set_clean(false);
        self
    }

    pub fn set_clean(&self, clean: bool) {
        if let Ok(mut state) = self.clean.lock() {
            *state = clean;
        }
    }

    /// Commands recorded so far, oldest first
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl Default for MockGit {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteTagLister for MockGit {
    fn list_remote_tags(&self) -> Result<String> {
        if self.fail_remote_listing {
            return Err(ReleaseError::ProcessFailure {
                command: "git ls-remote --tags --refs origin".to_string(),
                exit_status: Some(128),
                stderr: "fatal: could not read from remote repository".to_string(),
            });
        }
        Ok(self.listing.clone())
    }
}

impl SourceControl for MockGit {
    fn is_working_tree_clean(&self) -> Result<bool> {
        self.record("status --porcelain".to_string());
        Ok(self.clean.lock().map(|c| *c).unwrap_or(true))
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        self.record(format!("commit -m {}", message));
        self.set_clean(true);
        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.record(format!("tag {}", name));
        Ok(())
    }

    fn push_tag(&self, name: &str) -> Result<()> {
        self.record(format!("push origin refs/tags/{}", name));
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.record(format!("tag -d {}", name));
        Ok(())
    }

    fn delete_remote_tag(&self, name: &str) -> Result<()> {
        self.record(format!("push -d origin {}", name));
        Ok(())
    }

    fn reset_hard(&self, hash: &str) -> Result<()> {
        self.record(format!("reset --hard {}", hash));
        Ok(())
    }

    fn fetch(&self) -> Result<()> {
        self.record("fetch".to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TagLineParser;

    #[test]
    fn test_mock_listing_is_well_formed() {
        let git = MockGit::new().with_remote_tags(&["1.0.0", "development-1.1.0"]);
        let listing = git.list_remote_tags().unwrap();
        let names = TagLineParser::new().unwrap().parse(&listing).unwrap();
        assert_eq!(names, vec!["1.0.0", "development-1.1.0"]);
    }

    #[test]
    fn test_mock_default_is_clean_and_empty() {
        let git = MockGit::default();
        assert!(git.list_remote_tags().unwrap().is_empty());
        assert!(git.is_working_tree_clean().unwrap());
    }

    #[test]
    fn test_mock_commit_cleans_tree() {
        let git = MockGit::new().with_dirty_tree();
        assert!(!git.is_working_tree_clean().unwrap());
        git.commit_all("Version Bump (v1.0.0)").unwrap();
        assert!(git.is_working_tree_clean().unwrap());
        assert_eq!(
            git.calls(),
            vec![
                "status --porcelain",
                "commit -m Version Bump (v1.0.0)",
                "status --porcelain"
            ]
        );
    }

    #[test]
    fn test_mock_failing_remote() {
        let git = MockGit::new().with_failing_remote();
        assert!(matches!(
            git.list_remote_tags(),
            Err(ReleaseError::ProcessFailure { .. })
        ));
    }

    #[test]
    fn test_mock_records_tag_operations() {
        let git = MockGit::new();
        git.create_tag("1.4.0").unwrap();
        git.push_tag("1.4.0").unwrap();
        git.delete_tag("1.4.0").unwrap();
        git.delete_remote_tag("1.4.0").unwrap();
        git.reset_hard("abc123").unwrap();
        git.fetch().unwrap();
        assert_eq!(
            git.calls(),
            vec![
                "tag 1.4.0",
                "push origin refs/tags/1.4.0",
                "tag -d 1.4.0",
                "push -d origin 1.4.0",
                "reset --hard abc123",
                "fetch"
            ]
        );
    }
}
