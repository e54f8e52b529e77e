//! GitHub review host using the REST API
//!
//! Only two endpoints are used: `GET /user` and
//! `POST /repos/{owner}/{repo}/pulls`. Requests block; the pipeline is
//! sequential and has nothing to overlap them with.
//!
//! The credential comes from `GH_TOKEN`, falling back to `GITHUB_TOKEN`.

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::GitIdentity;
use crate::error::{ReleaseError, Result};
use crate::forge::{PullRequest, PullRequestDraft, ReviewHost};

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Environment variables checked for a token, in order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

const USER_AGENT_VALUE: &str = "release-branch";

/// GitHub REST client authenticated with a personal access token
pub struct GitHubClient {
    client: Client,
    token: String,
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_base", &self.api_base)
            .field("token", &"[redacted]")
            .finish()
    }
}

#[derive(Serialize)]
struct CreatePullBody<'a> {
    owner: &'a str,
    repo: &'a str,
    head: &'a str,
    base: &'a str,
    title: &'a str,
    body: &'a str,
}

#[derive(Deserialize)]
struct GitHubPull {
    number: u64,
    html_url: String,
}

#[derive(Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        GitHubClient {
            client: Client::new(),
            token: token.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from `GH_TOKEN` / `GITHUB_TOKEN`
    ///
    /// # Returns
    /// * `Err(ReleaseError::Credential)` - If neither variable holds a token
    pub fn from_env(api_base: impl Into<String>) -> Result<Self> {
        let token = TOKEN_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                ReleaseError::credential(
                    "The GH_TOKEN env var is required to push changes to GitHub. \
                     Use the --build-only flag to skip GitHub operations (a manual push will then be needed)",
                )
            })?;

        Ok(Self::new(token.trim(), api_base))
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| ReleaseError::credential("GitHub token contains invalid characters"))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    fn pulls_url(&self, draft: &PullRequestDraft) -> String {
        format!(
            "{}/repos/{}/{}/pulls",
            self.api_base, draft.repo.owner, draft.repo.repo
        )
    }

    /// Decode a successful response or map the failure to an API error.
    fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        operation: &str,
        response: Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            return response.json().map_err(|e| {
                ReleaseError::api(format!("{}: failed to parse response: {}", operation, e))
            });
        }

        let message = match response.json::<GitHubErrorResponse>() {
            Ok(err) => err.message,
            Err(_) => "Unknown error".to_string(),
        };

        Err(ReleaseError::api(match status {
            StatusCode::UNAUTHORIZED => format!("{}: invalid or expired token", operation),
            StatusCode::FORBIDDEN => format!("{}: permission denied: {}", operation, message),
            StatusCode::NOT_FOUND => format!("{}: not found: {}", operation, message),
            _ => format!("{}: {} {}", operation, status.as_u16(), message),
        }))
    }
}

impl ReviewHost for GitHubClient {
    fn authenticated_user(&self) -> Result<GitIdentity> {
        let url = format!("{}/user", self.api_base);
        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .map_err(|e| ReleaseError::api(format!("GET /user: {}", e)))?;

        self.handle_response("GET /user", response)
    }

    fn create_pull_request(&self, draft: &PullRequestDraft) -> Result<PullRequest> {
        let url = self.pulls_url(draft);
        let body = CreatePullBody {
            owner: &draft.repo.owner,
            repo: &draft.repo.repo,
            head: &draft.head,
            base: &draft.base,
            title: &draft.title,
            body: &draft.body,
        };

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .map_err(|e| ReleaseError::api(format!("POST pulls: {}", e)))?;

        let pull: GitHubPull = self.handle_response("POST pulls", response)?;
        Ok(PullRequest {
            number: pull.number,
            url: pull.html_url,
        })
    }
}
