use crate::error::Result;
use crate::git::{RemoteTagLister, SourceControl};
use crate::process;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend driving the system `git` binary
pub struct SystemGit {
    work_tree: PathBuf,
    remote: String,
}

impl SystemGit {
    /// Operate on the repository at `work_tree`, publishing to `remote`
    pub fn new(work_tree: impl Into<PathBuf>, remote: impl Into<String>) -> Self {
        SystemGit {
            work_tree: work_tree.into(),
            remote: remote.into(),
        }
    }

    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// `git -C <work_tree> <args...>`
    pub(crate) fn git_cmd<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.work_tree);
        cmd.args(args);
        cmd
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        process::run(self.git_cmd(args))
    }
}

impl RemoteTagLister for SystemGit {
    fn list_remote_tags(&self) -> Result<String> {
        self.git(&["ls-remote", "--tags", "--refs", self.remote.as_str()])
    }
}

impl SourceControl for SystemGit {
    fn is_working_tree_clean(&self) -> Result<bool> {
        let status = self.git(&["status", "--porcelain"])?;
        Ok(status.trim().is_empty())
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        self.git(&["add", "-A"])?;
        self.git(&["commit", "-m", message])?;
        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.git(&["tag", name])?;
        Ok(())
    }

    fn push_tag(&self, name: &str) -> Result<()> {
        let refspec = format!("refs/tags/{}", name);
        self.git(&["push", self.remote.as_str(), refspec.as_str()])?;
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.git(&["tag", "-d", name])?;
        Ok(())
    }

    fn delete_remote_tag(&self, name: &str) -> Result<()> {
        self.git(&["push", "-d", self.remote.as_str(), name])?;
        Ok(())
    }

    fn reset_hard(&self, hash: &str) -> Result<()> {
        self.git(&["reset", "--hard", hash])?;
        Ok(())
    }

    fn fetch(&self) -> Result<()> {
        self.git(&["fetch"])?;
        Ok(())
    }
}
