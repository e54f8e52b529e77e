//! Wiring between parsed CLI arguments and the release pipeline
//!
//! Keeps `main.rs` free of business logic: it loads configuration, checks the
//! current directory is inside a git working tree, builds the real
//! collaborators and runs the command there.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::{BuildArgs, PruneArgs};
use crate::config::load_config;
use crate::error::ReleaseError;
use crate::forge::GitHubClient;
use crate::manifest::FileManifestStore;
use crate::orchestrator::{ReleaseOrchestrator, ReleaseOutcome};
use crate::prune::prune;
use crate::registry::NpmRegistry;
use crate::shell::ShellExecutor;
use crate::ui;
use crate::version::SemverArithmetic;

/// Locate the working tree root of the git repository containing `start`
pub fn discover_root(start: &Path) -> crate::error::Result<PathBuf> {
    let repo = git2::Repository::discover(start)?;
    repo.workdir()
        .map(Path::to_path_buf)
        .ok_or_else(|| ReleaseError::config("bare repositories have no working tree to release from"))
}

/// Directory a release runs in
///
/// The release works on the package in `start` (which may be a workspace
/// member below the repository root) but refuses to run outside a git
/// working tree.
pub fn package_dir(start: &Path) -> crate::error::Result<PathBuf> {
    let root = discover_root(start)?;
    if root.canonicalize()? != start.canonicalize()? {
        ui::display_status(&format!(
            "Releasing the package in {} (repository root {})",
            start.display(),
            root.display()
        ));
    }
    Ok(start.to_path_buf())
}

/// Run `release-branch build`
///
/// The GitHub credential is checked before any command runs, so a missing
/// token never leaves a half-made branch behind.
pub fn run_build(args: BuildArgs, config_path: Option<&str>) -> Result<ReleaseOutcome> {
    let config = load_config(config_path)?;
    let request = args.into_request()?;

    let host = if request.publish.is_publish() {
        Some(GitHubClient::from_env(&config.github.api_base)?)
    } else {
        None
    };

    let dir = package_dir(&std::env::current_dir()?)?;
    let runner = ShellExecutor::new(&dir);
    let registry = NpmRegistry::new(&runner);
    let manifests = FileManifestStore::in_dir(&dir);

    let mut orchestrator =
        ReleaseOrchestrator::new(&config, &runner, &registry, &manifests, &SemverArithmetic);
    if let Some(host) = host.as_ref() {
        orchestrator = orchestrator.with_review_host(host);
    }

    Ok(orchestrator.run(&request)?)
}

/// Run `release-branch prune` in the current directory
pub fn run_prune(args: PruneArgs) -> Result<Vec<PathBuf>> {
    let root = std::env::current_dir()?;
    Ok(prune(&root, args.into())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_root_from_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        git2::Repository::init(dir.path()).unwrap();
        let nested = dir.path().join("packages/cli");
        std::fs::create_dir_all(&nested).unwrap();

        let root = discover_root(&nested).unwrap();
        assert_eq!(
            root.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_package_dir_stays_in_workspace_member() {
        let dir = tempfile::tempdir().unwrap();
        git2::Repository::init(dir.path()).unwrap();
        let member = dir.path().join("packages/plugin");
        std::fs::create_dir_all(&member).unwrap();

        let resolved = package_dir(&member).unwrap();
        assert_eq!(resolved, member);
        assert_eq!(
            FileManifestStore::in_dir(&resolved).path(),
            member.join("package.json")
        );
    }

    #[test]
    fn test_package_dir_rejects_bare_repository() {
        let dir = tempfile::tempdir().unwrap();
        git2::Repository::init_bare(dir.path()).unwrap();
        assert!(package_dir(dir.path()).is_err());
    }

    #[test]
    fn test_discover_root_bare_repository() {
        let dir = tempfile::tempdir().unwrap();
        git2::Repository::init_bare(dir.path()).unwrap();
        let err = discover_root(dir.path()).unwrap_err();
        assert!(matches!(err, ReleaseError::Config(_)));
    }
}
