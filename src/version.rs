//! Next-version computation
//!
//! The orchestrator only asks "given the current version and a bump mode, what
//! comes next?" through [VersionArithmetic]. [SemverArithmetic] is the default
//! answer, built on the `semver` crate.

use semver::{Prerelease, Version};

use crate::domain::BumpMode;
use crate::error::{ReleaseError, Result};

/// Computes the next version for a bump mode
pub trait VersionArithmetic: Send + Sync {
    fn next_version(&self, current: &str, bump: &BumpMode) -> Result<String>;
}

/// Semantic-version bump rules
///
/// - **Ordinary**: next minor, prerelease cleared (`1.2.3` -> `1.3.0`)
/// - **Patch**: next patch (`1.2.3` -> `1.2.4`); a prerelease is promoted to
///   its release (`1.2.4-dev.0` -> `1.2.4`)
/// - **Prerelease**: continues a prerelease on the same label, otherwise starts
///   one on the next patch (`3.4.0` + `dev` -> `3.4.1-dev.0`,
///   `3.4.1-dev.0` + `dev` -> `3.4.1-dev.1`, `3.4.0` + `dev.1` -> `3.4.1-dev.1`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SemverArithmetic;

impl VersionArithmetic for SemverArithmetic {
    fn next_version(&self, current: &str, bump: &BumpMode) -> Result<String> {
        let version = Version::parse(current.trim())
            .map_err(|e| ReleaseError::version(format!("Invalid version '{}': {}", current, e)))?;

        let next = match bump {
            BumpMode::Ordinary => Version::new(version.major, version.minor + 1, 0),
            BumpMode::Patch if !version.pre.is_empty() => {
                Version::new(version.major, version.minor, version.patch)
            }
            BumpMode::Patch => Version::new(version.major, version.minor, version.patch + 1),
            BumpMode::Prerelease(label) => next_prerelease(&version, label)?,
        };

        Ok(next.to_string())
    }
}

/// Split a prerelease into its label identifiers and optional trailing number
fn split_prerelease(pre: &str) -> (Vec<&str>, Option<u64>) {
    let mut parts: Vec<&str> = pre.split('.').collect();
    let number = parts.last().and_then(|last| last.parse::<u64>().ok());
    if number.is_some() {
        parts.pop();
    }
    (parts, number)
}

fn next_prerelease(version: &Version, label: &str) -> Result<Version> {
    let label = label.trim();
    if label.is_empty() {
        return Err(ReleaseError::version("Prerelease label is empty"));
    }
    Prerelease::new(label).map_err(|e| {
        ReleaseError::version(format!("Invalid prerelease label '{}': {}", label, e))
    })?;

    let (label_ids, label_number) = split_prerelease(label);
    if label_ids.is_empty() {
        return Err(ReleaseError::version(format!(
            "Prerelease label '{}' needs a non-numeric identifier",
            label
        )));
    }

    let mut next = Version::new(version.major, version.minor, version.patch);

    let pre = if version.pre.is_empty() {
        next.patch += 1;
        format_prerelease(&label_ids, label_number.unwrap_or(0))
    } else {
        let (current_ids, current_number) = split_prerelease(version.pre.as_str());
        match (label_number, current_number) {
            (Some(n), _) => format_prerelease(&label_ids, n),
            (None, Some(n)) if current_ids == label_ids => format_prerelease(&label_ids, n + 1),
            (None, _) => format_prerelease(&label_ids, 0),
        }
    };

    next.pre = Prerelease::new(&pre)
        .map_err(|e| ReleaseError::version(format!("Invalid prerelease '{}': {}", pre, e)))?;
    Ok(next)
}

fn format_prerelease(ids: &[&str], number: u64) -> String {
    format!("{}.{}", ids.join("."), number)
}
