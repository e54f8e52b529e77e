//! Command-line interface
//!
//! Build flags are turned into a [ReleaseRequest] here; `orchestration` wires
//! the real shell, registry, manifest store and GitHub client together.

pub mod orchestration;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::domain::{BumpMode, DependencyPolicy, PublishMode, ReleaseRequest, StartingPoint};
use crate::error::{ReleaseError, Result};
use crate::prune::PruneOptions;

#[derive(Debug, Parser)]
#[command(
    name = "release-branch",
    version,
    about = "Cut a release branch, bump the package version and open a release pull request"
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a release branch from a dist-tag or git ref and open a PR
    Build(BuildArgs),
    /// Remove files from node_modules that should not ship
    Prune(PruneArgs),
}

#[derive(Debug, Clone, Args)]
#[command(group(
    ArgGroup::new("start")
        .required(true)
        .args(["start_from_npm_dist_tag", "start_from_github_ref"])
))]
pub struct BuildArgs {
    #[arg(
        short = 'd',
        long,
        alias = "rctag",
        help = "npm dist-tag to start the release from (e.g. latest-rc)"
    )]
    pub start_from_npm_dist_tag: Option<String>,

    #[arg(
        short = 'g',
        long,
        help = "Git ref to start the release from (sha, branch or tag)"
    )]
    pub start_from_github_ref: Option<String>,

    #[arg(long, help = "Build locally without committing, pushing or opening a PR")]
    pub build_only: bool,

    #[arg(
        long,
        overrides_with = "no_resolutions",
        help = "Bump resolutions to their latest version (default)"
    )]
    pub resolutions: bool,

    #[arg(long, overrides_with = "resolutions", help = "Leave resolutions untouched")]
    pub no_resolutions: bool,

    #[arg(
        long,
        overrides_with = "no_pinned_deps",
        help = "Pin pinnedDependencies to their latest-rc version (default)"
    )]
    pub pinned_deps: bool,

    #[arg(long, overrides_with = "pinned_deps", help = "Leave pinned dependencies untouched")]
    pub no_pinned_deps: bool,

    #[arg(
        long,
        value_delimiter = ',',
        num_args = 1..,
        conflicts_with_all = ["resolutions", "no_resolutions", "pinned_deps", "no_pinned_deps"],
        help = "Bump only these dependencies (name or name@version)"
    )]
    pub only: Vec<String>,

    #[arg(long, conflicts_with = "prerelease", help = "Cut a patch release")]
    pub patch: bool,

    #[arg(long, help = "Cut a prerelease with this label (e.g. dev)")]
    pub prerelease: Option<String>,

    #[arg(long, help = "Regenerate command snapshots")]
    pub snapshot: bool,

    #[arg(long, help = "Regenerate command schemas")]
    pub schema: bool,
}

impl BuildArgs {
    /// Convert parsed flags into a release request
    pub fn into_request(self) -> Result<ReleaseRequest> {
        let start = match (self.start_from_github_ref, self.start_from_npm_dist_tag) {
            (Some(reference), None) => StartingPoint::Ref(reference),
            (None, Some(tag)) => StartingPoint::DistTag(tag),
            _ => {
                return Err(ReleaseError::config(
                    "exactly one of --start-from-npm-dist-tag or --start-from-github-ref is required",
                ))
            }
        };

        let dependencies = if self.only.is_empty() {
            DependencyPolicy::Policies {
                resolutions: !self.no_resolutions,
                pinned: !self.no_pinned_deps,
            }
        } else {
            DependencyPolicy::Only(self.only)
        };

        Ok(ReleaseRequest::new(start)
            .with_publish(PublishMode::from_build_only(self.build_only))
            .with_dependencies(dependencies)
            .with_bump(BumpMode::from_flags(self.patch, self.prerelease))
            .with_snapshot(self.snapshot)
            .with_schema(self.schema))
    }
}

#[derive(Debug, Clone, Args)]
pub struct PruneArgs {
    #[arg(short = 'd', long, help = "List what would be removed without deleting")]
    pub dryrun: bool,

    #[arg(short = 't', long, help = "Also remove TypeScript declaration files")]
    pub types: bool,

    #[arg(long, help = "Print every removed path")]
    pub verbose: bool,
}

impl From<PruneArgs> for PruneOptions {
    fn from(args: PruneArgs) -> Self {
        PruneOptions {
            dry_run: args.dryrun,
            types: args.types,
            verbose: args.verbose,
        }
    }
}
