//! Release workflow orchestration
//!
//! Ties the remote tag listing, version policy and project files together.
//! Each call re-reads the remote; nothing is cached between calls.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::boundary::BoundaryWarning;
use crate::domain::{
    bump, externalize, resolve_current, Environment, IncrementKind, SemanticVersion,
    TagLineParser, VersionClassifier, VersionPair,
};
use crate::error::{ReleaseError, Result};
use crate::git::{RemoteTagLister, SourceControl};
use crate::project::VersionFile;

/// Current version of an environment, as seen on the remote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub environment: Environment,
    pub current: SemanticVersion,
    /// Release tags of this environment found on the remote
    pub matched_tags: usize,
}

impl Resolution {
    /// Version the next increment of `kind` would produce
    pub fn next(&self, kind: IncrementKind) -> SemanticVersion {
        bump(self.current, kind)
    }

    pub fn warning(&self) -> Option<BoundaryWarning> {
        (self.matched_tags == 0).then_some(BoundaryWarning::NoReleaseTags {
            environment: self.environment,
        })
    }
}

/// What [ReleaseOrchestrator::reconcile_platform_versions] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Version both platforms agreed on before reconciling
    pub platform_version: SemanticVersion,
    /// Set when both platforms were rewritten to a new major baseline
    pub platforms_reset_to: Option<SemanticVersion>,
    pub commit_message: String,
    pub committed: bool,
}

impl ReconcileOutcome {
    pub fn warnings(&self) -> Vec<BoundaryWarning> {
        let mut warnings = Vec::new();
        if let Some(to) = self.platforms_reset_to {
            warnings.push(BoundaryWarning::PlatformMajorReset {
                from: self.platform_version,
                to,
            });
        }
        if !self.committed {
            warnings.push(BoundaryWarning::NothingToCommit {
                message: self.commit_message.clone(),
            });
        }
        warnings
    }
}

/// Commit message recorded after a version bump
pub fn version_bump_message(target: &SemanticVersion) -> String {
    format!("Version Bump (v{})", target)
}

/// Drives one release against explicit collaborators
pub struct ReleaseOrchestrator<'a> {
    remote: &'a dyn RemoteTagLister,
    scm: &'a dyn SourceControl,
    manifest: &'a dyn VersionFile,
    parser: TagLineParser,
    classifier: VersionClassifier,
}

impl<'a> ReleaseOrchestrator<'a> {
    pub fn new(
        remote: &'a dyn RemoteTagLister,
        scm: &'a dyn SourceControl,
        manifest: &'a dyn VersionFile,
    ) -> Result<Self> {
        Ok(ReleaseOrchestrator {
            remote,
            scm,
            manifest,
            parser: TagLineParser::new()?,
            classifier: VersionClassifier::new()?,
        })
    }

    /// List, parse and classify the remote tags, then pick the current version
    pub fn resolve(&self, env: Environment) -> Result<Resolution> {
        let listing = self.remote.list_remote_tags()?;
        let tags = self.parser.parse(&listing)?;
        let versions = self.classifier.classify(&tags, env);
        let current = resolve_current(&versions);

        debug!(
            environment = %env,
            tags = tags.len(),
            matched = versions.len(),
            %current,
            "resolved current version"
        );

        Ok(Resolution {
            environment: env,
            current,
            matched_tags: versions.len(),
        })
    }

    /// Current version of `env` without bumping or writing anything
    pub fn current_version(&self, env: Environment) -> Result<SemanticVersion> {
        Ok(self.resolve(env)?.current)
    }

    /// Compute and record the next version of `env`
    ///
    /// In production the manifest is rewritten; development versions only
    /// exist as tags. Nothing is written if resolution fails.
    pub fn increment(&self, env: Environment, kind: IncrementKind) -> Result<VersionPair> {
        let resolution = self.resolve(env)?;
        self.increment_from(&resolution, kind)
    }

    /// Like [ReleaseOrchestrator::increment], from an already fetched resolution
    pub fn increment_from(
        &self,
        resolution: &Resolution,
        kind: IncrementKind,
    ) -> Result<VersionPair> {
        let next = resolution.next(kind);
        let pair = externalize(next, resolution.environment, self.manifest)?;

        info!(
            environment = %resolution.environment,
            %kind,
            from = %resolution.current,
            to = %pair.version,
            tag = %pair.tag_name,
            "incremented version"
        );
        Ok(pair)
    }

    /// Bump `env` and bring both platforms in line with the new version
    ///
    /// Platform parity is checked before the manifest is touched, so a
    /// mismatch leaves every file as it was.
    pub fn release(
        &self,
        resolution: &Resolution,
        kind: IncrementKind,
        primary: &dyn VersionFile,
        secondary: &dyn VersionFile,
    ) -> Result<(VersionPair, ReconcileOutcome)> {
        check_platform_parity(primary, secondary)?;
        let pair = self.increment_from(resolution, kind)?;
        let outcome = self.reconcile_platform_versions(&pair.version, primary, secondary)?;
        Ok((pair, outcome))
    }

    /// Bring the iOS (`primary`) and Android (`secondary`) binaries in line with `target`
    ///
    /// Both platforms must already agree. When their major differs from the
    /// target's they are rewritten to `{target.major}.0.0`. Pending changes
    /// are committed only if the working tree is dirty.
    pub fn reconcile_platform_versions(
        &self,
        target: &SemanticVersion,
        primary: &dyn VersionFile,
        secondary: &dyn VersionFile,
    ) -> Result<ReconcileOutcome> {
        let primary_version = check_platform_parity(primary, secondary)?;

        let platforms_reset_to = if primary_version.major != target.major {
            let baseline = target.major_baseline();
            primary.write_version(&baseline)?;
            secondary.write_version(&baseline)?;
            info!(from = %primary_version, to = %baseline, "reset platform versions");
            Some(baseline)
        } else {
            debug!(version = %primary_version, "platform versions already on target major");
            None
        };

        let commit_message = version_bump_message(target);
        let committed = if self.scm.is_working_tree_clean()? {
            debug!("working tree clean, nothing to commit");
            false
        } else {
            self.scm.commit_all(&commit_message)?;
            info!(message = %commit_message, "committed version bump");
            true
        };

        Ok(ReconcileOutcome {
            platform_version: primary_version,
            platforms_reset_to,
            commit_message,
            committed,
        })
    }

    /// Tag HEAD with the new version and optionally publish the tag
    pub fn publish_tag(&self, pair: &VersionPair, push: bool) -> Result<()> {
        self.scm.create_tag(&pair.tag_name)?;
        if push {
            self.scm.push_tag(&pair.tag_name)?;
        }
        info!(tag = %pair.tag_name, pushed = push, "created release tag");
        Ok(())
    }
}

/// The version both platforms share, or `PlatformVersionMismatch`
pub fn check_platform_parity(
    primary: &dyn VersionFile,
    secondary: &dyn VersionFile,
) -> Result<SemanticVersion> {
    let primary_version = primary.read_version()?;
    let secondary_version = secondary.read_version()?;

    if primary_version != secondary_version {
        return Err(ReleaseError::PlatformVersionMismatch {
            primary: primary_version,
            secondary: secondary_version,
        });
    }
    Ok(primary_version)
}

/// Reject any supplied key outside `allowed`
///
/// Offending keys are reported sorted and without duplicates. Allowed keys
/// that were not supplied are fine.
pub fn validate_config_keys<'k, I>(supplied: I, allowed: &[&str]) -> Result<()>
where
    I: IntoIterator<Item = &'k str>,
{
    let unsupported: BTreeSet<&str> = supplied
        .into_iter()
        .filter(|key| !allowed.iter().any(|allowed_key| allowed_key == key))
        .collect();

    if unsupported.is_empty() {
        Ok(())
    } else {
        Err(ReleaseError::UnsupportedConfigKeys(
            unsupported.into_iter().map(str::to_string).collect(),
        ))
    }
}
