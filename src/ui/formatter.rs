//! Pure formatting functions for UI output.
//!
//! Everything the pipeline reports to the operator goes through here: progress
//! lines, the header printed for each external command, and the final summary.

use console::style;

use crate::orchestrator::ReleaseOutcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a warning message in yellow.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a styled header for an executed command, followed by its output.
///
/// Empty output prints only the header.
pub fn display_command(command: &str, output: &str) {
    println!("\n{}", style(format!("=== {}", command)).bold());
    let trimmed = output.trim_end();
    if !trimmed.is_empty() {
        println!("{}", trimmed);
    }
}

/// Report a batch of pruned files.
///
/// # Arguments
/// * `paths` - Paths matched by one prune rule
/// * `label` - Human-readable description of the rule (e.g. ".md files")
/// * `dry_run` - Whether the files are only being listed
/// * `verbose` - Whether to list every path
pub fn display_prune(paths: &[String], label: &str, dry_run: bool, verbose: bool) {
    if paths.is_empty() {
        return;
    }

    let prefix = if dry_run {
        "[DRYRUN] Removing:"
    } else {
        "Removing:"
    };
    println!("{} {} {}", style(prefix).red().bold(), paths.len(), label);

    if verbose {
        for path in paths {
            println!("  {}", path);
        }
    }
}

/// Display the final summary of a release run.
pub fn display_release_summary(outcome: &ReleaseOutcome) {
    println!("\n{}", style("Release branch summary:").bold());
    println!("  Version: {}", style(&outcome.next_version).green());
    println!("  Branch:  {}", style(&outcome.plan.branch).cyan());
    println!("  PR base: {}", outcome.plan.pr_base);
    let stages: Vec<String> = outcome.stages.iter().map(ToString::to_string).collect();
    println!("  Stages:  {}", style(stages.join(" → ")).dim());

    match &outcome.pull_request {
        Some(pr) => println!("  Pull request: {}", style(&pr.url).cyan()),
        None => println!(
            "  Pull request: {}",
            style("not created (build only)").dim()
        ),
    }
}
