//! Release branch orchestration
//!
//! Drives one release from a starting point to an open pull request:
//!
//! 1. Check out the starting ref
//! 2. Create the release branch (patch branches are pushed right away)
//! 3. Bump the manifest version and dependencies, persist once
//! 4. Install dependencies and deduplicate the lockfile
//! 5. Optionally regenerate command snapshots and schemas
//! 6. Optionally publish: git identity, commit, push, pull request
//!
//! Every stage is a free function over injected capabilities. Any failure
//! aborts the run; nothing is rolled back or retried.

pub mod publish;

use std::fmt;

use crate::config::{CommandsConfig, Config};
use crate::domain::{BranchPlan, DependencyPolicy, ReleaseRequest, StartingPoint};
use crate::error::{ReleaseError, Result};
use crate::forge::{PullRequest, ReviewHost};
use crate::manifest::{mutator, Manifest, ManifestStore};
use crate::registry::PackageRegistry;
use crate::resolver::{resolve_next_version, resolve_starting_ref};
use crate::shell::{quote, CommandRunner, Echo};
use crate::ui;
use crate::version::VersionArithmetic;

/// Pipeline stages, in the order they are reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStage {
    CheckedOut,
    Branched,
    VersionBumped,
    DependenciesInstalled,
    SnapshotUpdated,
    SchemaUpdated,
    Published,
    Done,
}

impl fmt::Display for ReleaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReleaseStage::CheckedOut => "checked out",
            ReleaseStage::Branched => "branched",
            ReleaseStage::VersionBumped => "version bumped",
            ReleaseStage::DependenciesInstalled => "dependencies installed",
            ReleaseStage::SnapshotUpdated => "snapshot updated",
            ReleaseStage::SchemaUpdated => "schema updated",
            ReleaseStage::Published => "published",
            ReleaseStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Result of a completed release run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    pub starting_ref: String,
    pub previous_version: String,
    pub next_version: String,
    pub plan: BranchPlan,
    /// Dependencies and resolutions whose versions changed
    pub changed_dependencies: Vec<String>,
    pub stages: Vec<ReleaseStage>,
    pub pull_request: Option<PullRequest>,
}

/// Sequences a release over injected collaborators
pub struct ReleaseOrchestrator<'a> {
    config: &'a Config,
    runner: &'a dyn CommandRunner,
    registry: &'a dyn PackageRegistry,
    manifests: &'a dyn ManifestStore,
    arithmetic: &'a dyn VersionArithmetic,
    host: Option<&'a dyn ReviewHost>,
}

impl<'a> ReleaseOrchestrator<'a> {
    pub fn new(
        config: &'a Config,
        runner: &'a dyn CommandRunner,
        registry: &'a dyn PackageRegistry,
        manifests: &'a dyn ManifestStore,
        arithmetic: &'a dyn VersionArithmetic,
    ) -> Self {
        ReleaseOrchestrator {
            config,
            runner,
            registry,
            manifests,
            arithmetic,
            host: None,
        }
    }

    /// Review host used by the publish phase
    pub fn with_review_host(mut self, host: &'a dyn ReviewHost) -> Self {
        self.host = Some(host);
        self
    }

    /// Run the whole pipeline for `request`
    ///
    /// # Returns
    /// * `Ok(ReleaseOutcome)` - Every enabled stage completed
    /// * `Err` - The first failing stage's error; later stages did not run
    pub fn run(&self, request: &ReleaseRequest) -> Result<ReleaseOutcome> {
        let publishing = request.publish.is_publish();
        let host = match (publishing, self.host) {
            (true, Some(host)) => Some(host),
            (true, None) => {
                return Err(ReleaseError::credential(
                    "publishing requires a review host; use --build-only to skip GitHub operations",
                ))
            }
            (false, _) => None,
        };

        if request.dependencies.is_split() {
            ui::display_warning(
                "Only one of resolutions/pinned-deps is enabled; confirm this combination is intended",
            );
        }

        let mut stages = Vec::new();

        let starting_ref = self.starting_ref(&request.start)?;
        checkout(self.runner, &starting_ref)?;
        stages.push(ReleaseStage::CheckedOut);

        let mut manifest = self.manifests.load()?;
        let previous_version = manifest.version()?.to_string();
        let next_version = resolve_next_version(&previous_version, &request.bump, self.arithmetic)?;
        let plan = BranchPlan::new(&request.bump, &next_version, &self.config.integration_branch);
        let repo = if publishing {
            Some(manifest.repository()?)
        } else {
            None
        };

        ui::display_status(&format!(
            "Starting from '{}' ({}) and creating {} branch '{}'",
            starting_ref, previous_version, request.bump, plan.branch
        ));
        let push_base_early = request.bump.is_patch() && publishing;
        create_branch(self.runner, &plan, push_base_early, &self.config.remote)?;
        stages.push(ReleaseStage::Branched);

        let changed_dependencies = bump_manifest(
            &mut manifest,
            &next_version,
            &request.dependencies,
            self.registry,
            self.config,
        )?;
        self.manifests.persist(&manifest)?;
        stages.push(ReleaseStage::VersionBumped);

        install_dependencies(self.runner, &self.config.commands)?;
        stages.push(ReleaseStage::DependenciesInstalled);

        if request.snapshot {
            update_snapshots(self.runner, self.config.snapshot.script_for(manifest.name()?))?;
            stages.push(ReleaseStage::SnapshotUpdated);
        }

        if request.schema {
            update_schemas(self.runner, &self.config.commands.schema)?;
            stages.push(ReleaseStage::SchemaUpdated);
        }

        ui::display_success("Updates complete");

        let pull_request = match (host, repo) {
            (Some(host), Some(repo)) => {
                let pr = publish::publish(
                    self.runner,
                    host,
                    &repo,
                    &next_version,
                    &plan,
                    &request.bump,
                    &self.config.remote,
                )?;
                stages.push(ReleaseStage::Published);
                Some(pr)
            }
            _ => None,
        };

        stages.push(ReleaseStage::Done);

        Ok(ReleaseOutcome {
            starting_ref,
            previous_version,
            next_version,
            plan,
            changed_dependencies,
            stages,
            pull_request,
        })
    }

    /// Resolve the ref to check out
    ///
    /// Only a dist-tag start reads the manifest before checkout, to learn the
    /// package name; an explicit ref is used as given.
    fn starting_ref(&self, start: &StartingPoint) -> Result<String> {
        let package = match start {
            StartingPoint::DistTag(_) => self.manifests.load()?.name()?.to_string(),
            StartingPoint::Ref(_) => String::new(),
        };
        resolve_starting_ref(start, &package, self.registry)
    }
}

/// Check out the starting point
///
/// Works with a sha or tag (detached) and with a remote branch name.
pub fn checkout(runner: &dyn CommandRunner, reference: &str) -> Result<()> {
    runner.run(&format!("git checkout {}", quote(reference)?), Echo::Loud)?;
    Ok(())
}

/// Create and switch to the release branch
///
/// With `push_upstream`, the untouched branch is pushed immediately so it can
/// serve as the pull-request base before any file changes.
pub fn create_branch(
    runner: &dyn CommandRunner,
    plan: &BranchPlan,
    push_upstream: bool,
    remote: &str,
) -> Result<()> {
    let branch = quote(&plan.branch)?;
    runner.run(&format!("git switch -c {}", branch), Echo::Loud)?;

    if push_upstream {
        runner.run(
            &format!("git push -u {} {}", quote(remote)?, branch),
            Echo::Loud,
        )?;
    }
    Ok(())
}

/// Apply the next version and the dependency policy to the manifest
///
/// Does not persist.
///
/// # Returns
/// * `Ok(Vec<String>)` - Names whose versions changed
/// * `Err(ReleaseError::NoChanges)` - If a restricted list changed nothing
pub fn bump_manifest(
    manifest: &mut Manifest,
    next_version: &str,
    policy: &DependencyPolicy,
    registry: &dyn PackageRegistry,
    config: &Config,
) -> Result<Vec<String>> {
    ui::display_status(&format!("Setting the version to {}", next_version));
    mutator::set_version(manifest, next_version);

    match policy {
        DependencyPolicy::Only(specs) => {
            ui::display_status(&format!(
                "Bumping the following dependencies only: {}",
                specs.join(", ")
            ));
            let changed = mutator::bump_only(manifest, registry, specs)?;
            if changed.is_empty() {
                return Err(ReleaseError::NoChanges {
                    requested: specs.clone(),
                });
            }
            Ok(changed)
        }
        DependencyPolicy::Policies {
            resolutions,
            pinned,
        } => {
            let mut changed = Vec::new();
            if *resolutions {
                let tag = &config.policies.resolutions_tag;
                ui::display_status(&format!(
                    "Bumping resolutions in the package.json to their \"{}\"",
                    tag
                ));
                changed.extend(mutator::bump_resolutions(manifest, registry, tag)?);
            }
            if *pinned {
                let tag = &config.policies.pinned_tag;
                ui::display_status(&format!(
                    "Pinning dependencies in pinnedDependencies to \"{}\"",
                    tag
                ));
                changed.extend(mutator::pin_dependencies(manifest, registry, tag)?);
            }
            Ok(changed)
        }
    }
}

/// Install dependencies, then streamline the lockfile
pub fn install_dependencies(runner: &dyn CommandRunner, commands: &CommandsConfig) -> Result<()> {
    runner.run(&commands.install, Echo::Loud)?;
    runner.run(&commands.dedupe, Echo::Loud)?;
    Ok(())
}

pub fn update_snapshots(runner: &dyn CommandRunner, script: &str) -> Result<()> {
    ui::display_status("Updating snapshots");
    runner.run(script, Echo::Loud)?;
    Ok(())
}

pub fn update_schemas(runner: &dyn CommandRunner, command: &str) -> Result<()> {
    ui::display_status("Updating schema");
    runner.run(command, Echo::Loud)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BumpMode;
    use crate::registry::StaticRegistry;
    use crate::shell::RecordingRunner;

    fn plan(bump: BumpMode, version: &str) -> BranchPlan {
        BranchPlan::new(&bump, version, "main")
    }

    #[test]
    fn test_create_branch_without_push() {
        let runner = RecordingRunner::new();
        create_branch(&runner, &plan(BumpMode::Ordinary, "1.3.0"), false, "origin").unwrap();
        assert_eq!(runner.commands(), vec!["git switch -c 1.3.0"]);
    }

    #[test]
    fn test_create_branch_pushes_patch_base() {
        let runner = RecordingRunner::new();
        create_branch(&runner, &plan(BumpMode::Patch, "1.2.4"), true, "origin").unwrap();
        assert_eq!(
            runner.commands(),
            vec!["git switch -c patch/1.2.4", "git push -u origin patch/1.2.4"]
        );
    }

    #[test]
    fn test_install_failure_stops_before_dedupe() {
        let mut runner = RecordingRunner::new();
        runner.fail("yarn install", "exit code 1");
        let err = install_dependencies(&runner, &CommandsConfig::default()).unwrap_err();
        assert!(matches!(err, ReleaseError::Command { .. }));
        assert!(!runner.ran("npx yarn-deduplicate"));
    }

    #[test]
    fn test_bump_manifest_only_without_changes() {
        let mut manifest =
            Manifest::from_json(r#"{"name": "a", "version": "1.0.0", "dependencies": {}}"#)
                .unwrap();
        let err = bump_manifest(
            &mut manifest,
            "1.1.0",
            &DependencyPolicy::Only(vec!["missing".to_string()]),
            &StaticRegistry::new(),
            &Config::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ReleaseError::NoChanges { .. }));
    }

    #[test]
    fn test_bump_manifest_policies_disabled() {
        let mut manifest = Manifest::from_json(
            r#"{"name": "a", "version": "1.0.0", "resolutions": {"b": "1.0.0"}}"#,
        )
        .unwrap();
        let changed = bump_manifest(
            &mut manifest,
            "1.1.0",
            &DependencyPolicy::Policies {
                resolutions: false,
                pinned: false,
            },
            &StaticRegistry::new(),
            &Config::default(),
        )
        .unwrap();
        assert!(changed.is_empty());
        assert_eq!(manifest.version().unwrap(), "1.1.0");
        assert_eq!(manifest.resolution("b"), Some("1.0.0"));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(ReleaseStage::DependenciesInstalled.to_string(), "dependencies installed");
    }
}
