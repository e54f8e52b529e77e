//! Package registry lookups
//!
//! Distribution tags ("latest", "latest-rc") and tag-to-version resolution come
//! from the registry. [NpmRegistry] asks the `npm` CLI through the shell
//! executor; [mock::StaticRegistry] serves fixed data in tests.

pub mod mock;

pub use mock::StaticRegistry;

use std::collections::BTreeMap;

use crate::error::{ReleaseError, Result};
use crate::shell::{quote, CommandRunner, Echo};

/// Read-only view of a package registry
pub trait PackageRegistry: Send + Sync {
    /// All distribution tags of `package`, mapped to versions
    fn dist_tags(&self, package: &str) -> Result<BTreeMap<String, String>>;

    /// The version `package@tag_or_range` resolves to
    fn resolve(&self, package: &str, tag_or_range: &str) -> Result<String>;
}

/// Registry backed by `npm view`
pub struct NpmRegistry<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> NpmRegistry<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        NpmRegistry { runner }
    }
}

impl PackageRegistry for NpmRegistry<'_> {
    fn dist_tags(&self, package: &str) -> Result<BTreeMap<String, String>> {
        let command = format!("npm view {} dist-tags --json", quote(package)?);
        let output = self.runner.run(&command, Echo::Silent)?;
        if output.trimmed().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(output.trimmed())?)
    }

    fn resolve(&self, package: &str, tag_or_range: &str) -> Result<String> {
        let spec = format!("{}@{}", package, tag_or_range);
        let command = format!("npm view {} version --json", quote(&spec)?);
        let output = self.runner.run(&command, Echo::Silent)?;
        parse_view_version(output.trimmed())
            .ok_or_else(|| ReleaseError::resolution(tag_or_range, package))
    }
}

/// Extract a version from `npm view <spec> version --json` output
///
/// npm prints a bare string for a single match and an array when a range
/// matches several versions; the highest (last) entry wins.
fn parse_view_version(output: &str) -> Option<String> {
    if output.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(output).ok()? {
        serde_json::Value::String(v) => Some(v),
        serde_json::Value::Array(items) => items
            .last()
            .and_then(|v| v.as_str())
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::RecordingRunner;

    #[test]
    fn test_dist_tags_parses_json() {
        let mut runner = RecordingRunner::new();
        runner.respond(
            "npm view @salesforce/cli dist-tags",
            r#"{"latest": "2.1.0", "latest-rc": "2.2.0"}"#,
        );

        let registry = NpmRegistry::new(&runner);
        let tags = registry.dist_tags("@salesforce/cli").unwrap();
        assert_eq!(tags.get("latest-rc"), Some(&"2.2.0".to_string()));
        assert_eq!(runner.silent_commands().len(), 1);
    }

    #[test]
    fn test_resolve_single_version() {
        let mut runner = RecordingRunner::new();
        runner.respond("npm view foo@latest-rc", "\"1.4.0\"\n");

        let registry = NpmRegistry::new(&runner);
        assert_eq!(registry.resolve("foo", "latest-rc").unwrap(), "1.4.0");
        assert_eq!(
            runner.commands(),
            vec!["npm view foo@latest-rc version --json"]
        );
    }

    #[test]
    fn test_resolve_range_takes_highest() {
        assert_eq!(
            parse_view_version(r#"["1.0.0", "1.0.1", "1.1.0"]"#),
            Some("1.1.0".to_string())
        );
    }

    #[test]
    fn test_resolve_unknown_is_resolution_error() {
        let runner = RecordingRunner::new();
        let registry = NpmRegistry::new(&runner);
        let err = registry.resolve("foo", "nightly").unwrap_err();
        assert!(matches!(err, ReleaseError::Resolution { .. }));
    }
}
