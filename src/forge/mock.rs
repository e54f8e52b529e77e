use std::sync::Mutex;

use crate::domain::GitIdentity;
use crate::error::{ReleaseError, Result};
use crate::forge::{PullRequest, PullRequestDraft, ReviewHost};

/// Review host double that records every request
pub struct FakeReviewHost {
    identity: GitIdentity,
    fail_pull_requests: bool,
    user_lookups: Mutex<usize>,
    pull_requests: Mutex<Vec<PullRequestDraft>>,
}

impl FakeReviewHost {
    /// Host whose authenticated user is `identity`
    pub fn new(identity: GitIdentity) -> Self {
        FakeReviewHost {
            identity,
            fail_pull_requests: false,
            user_lookups: Mutex::new(0),
            pull_requests: Mutex::new(Vec::new()),
        }
    }

    /// Make pull-request creation fail with an API error
    pub fn failing_pull_requests(mut self) -> Self {
        self.fail_pull_requests = true;
        self
    }

    pub fn pull_requests(&self) -> Vec<PullRequestDraft> {
        self.pull_requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn user_lookups(&self) -> usize {
        *self
            .user_lookups
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for FakeReviewHost {
    fn default() -> Self {
        Self::new(GitIdentity::default())
    }
}

impl ReviewHost for FakeReviewHost {
    fn authenticated_user(&self) -> Result<GitIdentity> {
        *self
            .user_lookups
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) += 1;
        Ok(self.identity.clone())
    }

    fn create_pull_request(&self, draft: &PullRequestDraft) -> Result<PullRequest> {
        if self.fail_pull_requests {
            return Err(ReleaseError::api("422 Unprocessable Entity: Validation Failed"));
        }

        let mut pulls = self
            .pull_requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        pulls.push(draft.clone());
        let number = pulls.len() as u64;

        Ok(PullRequest {
            number,
            url: format!(
                "https://github.com/{}/{}/pull/{}",
                draft.repo.owner, draft.repo.repo, number
            ),
        })
    }
}
