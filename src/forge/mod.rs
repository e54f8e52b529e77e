//! Hosted code-review system
//!
//! The publish phase needs two calls from the review host: the authenticated
//! user (to fill in a missing local git identity) and pull-request creation.
//!
//! - [github::GitHubClient]: GitHub REST API over blocking `reqwest`
//! - [mock::FakeReviewHost]: records pull requests in memory

pub mod github;
pub mod mock;

pub use github::GitHubClient;
pub use mock::FakeReviewHost;

use crate::domain::GitIdentity;
use crate::error::Result;
use crate::manifest::RepoSlug;

/// Pull request to open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestDraft {
    pub repo: RepoSlug,
    /// Branch holding the changes
    pub head: String,
    /// Branch to merge into
    pub base: String,
    pub title: String,
    pub body: String,
}

/// Pull request as reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub url: String,
}

/// Operations the release needs from the review host
pub trait ReviewHost: Send + Sync {
    /// Identity of the user the credential belongs to
    fn authenticated_user(&self) -> Result<GitIdentity>;

    fn create_pull_request(&self, draft: &PullRequestDraft) -> Result<PullRequest>;
}
