//! Publish phase: git identity, commit, push and pull request

use crate::domain::identity::{identity_updates, needs_lookup};
use crate::domain::{BranchPlan, BumpMode};
use crate::error::Result;
use crate::forge::{PullRequest, PullRequestDraft, ReviewHost};
use crate::manifest::RepoSlug;
use crate::shell::{quote, CommandRunner, Echo};
use crate::ui;

/// Explanation appended to prerelease pull requests targeting `base`
fn prerelease_note(base: &str) -> String {
    format!(
        "\n**IMPORTANT:**\nPrereleases work differently than regular releases. \
Github Actions watches for branches prefixed with `prerelease/`. As long as the `package.json` \
contains a valid \"prerelease tag\" (1.2.3-dev.0), a new prerelease will be created for EVERY COMMIT \
pushed to that branch. If you would like to merge this PR into `{}`, simply push one more commit \
to this branch that sets the version in the `package.json` to the version you'd like to release.",
        base
    )
}

/// Commit the release changes, push the branch and open the pull request
pub fn publish(
    runner: &dyn CommandRunner,
    host: &dyn ReviewHost,
    repo: &RepoSlug,
    next_version: &str,
    plan: &BranchPlan,
    bump: &BumpMode,
    remote: &str,
) -> Result<PullRequest> {
    ensure_git_identity(runner, host)?;
    commit_and_push(runner, next_version, plan, remote)?;

    let draft = pull_request_draft(repo, next_version, plan, bump);
    let pr = host.create_pull_request(&draft)?;
    ui::display_success(&format!("Opened pull request #{}: {}", pr.number, pr.url));
    Ok(pr)
}

/// Make sure `user.name` and `user.email` are configured locally
///
/// Local values are read silently. The host is only asked when one of them is
/// empty, and only the empty ones are written.
pub fn ensure_git_identity(runner: &dyn CommandRunner, host: &dyn ReviewHost) -> Result<()> {
    let name = read_git_config(runner, "user.name")?;
    let email = read_git_config(runner, "user.email")?;

    if !needs_lookup(&name, &email) {
        return Ok(());
    }

    let fetched = host.authenticated_user()?;
    for update in identity_updates(&name, &email, &fetched) {
        runner.run(
            &format!("git config {} {}", update.key, quote(&update.value)?),
            Echo::Loud,
        )?;
    }
    Ok(())
}

/// Unset keys read as empty instead of failing the command
fn read_git_config(runner: &dyn CommandRunner, key: &str) -> Result<String> {
    let output = runner.run(&format!("git config --get --default '' {}", key), Echo::Silent)?;
    Ok(output.trimmed().to_string())
}

/// Stage everything, commit with the release message and push the branch
///
/// Pre-push hooks are skipped.
pub fn commit_and_push(
    runner: &dyn CommandRunner,
    next_version: &str,
    plan: &BranchPlan,
    remote: &str,
) -> Result<()> {
    runner.run("git add .", Echo::Loud)?;
    runner.run(
        &format!("git commit -m {}", quote(&commit_message(next_version))?),
        Echo::Loud,
    )?;
    runner.run(
        &format!(
            "git push --set-upstream {} {} --no-verify",
            quote(remote)?,
            quote(&plan.branch)?
        ),
        Echo::Loud,
    )?;
    Ok(())
}

pub fn commit_message(next_version: &str) -> String {
    format!("chore(release): bump to {}", next_version)
}

/// Build the release pull request
///
/// The head is the bare next version; prerelease bodies carry an explanation
/// of how prerelease branches publish.
pub fn pull_request_draft(
    repo: &RepoSlug,
    next_version: &str,
    plan: &BranchPlan,
    bump: &BumpMode,
) -> PullRequestDraft {
    let details = if bump.is_prerelease() {
        prerelease_note(&plan.pr_base)
    } else {
        String::new()
    };

    PullRequestDraft {
        repo: repo.clone(),
        head: next_version.to_string(),
        base: plan.pr_base.clone(),
        title: format!("Release PR for {}", next_version),
        body: format!("Building {} [skip-validate-pr]{}", next_version, details),
    }
}
