//! Package manifest (`package.json`) model
//!
//! The manifest is held as an order-preserving JSON object so that fields the
//! release does not touch survive a write unchanged. Typed accessors cover the
//! handful of fields the release reads or mutates.

pub mod mutator;
pub mod store;

pub use store::{FileManifestStore, ManifestStore, MemoryManifestStore};

use std::collections::BTreeSet;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{ReleaseError, Result};

/// In-memory `package.json` document
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    data: Map<String, Value>,
}

/// GitHub repository coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl Manifest {
    /// Parse a manifest from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(data) => Ok(Manifest { data }),
            _ => Err(ReleaseError::manifest("package.json is not a JSON object")),
        }
    }

    /// Serialize with two-space indentation and a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(&self.data)?;
        text.push('\n');
        Ok(text)
    }

    pub fn name(&self) -> Result<&str> {
        self.required_str("name")
    }

    pub fn version(&self) -> Result<&str> {
        self.required_str("version")
    }

    pub fn set_version(&mut self, version: &str) {
        self.data
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    /// Current range of a runtime dependency
    pub fn dependency(&self, name: &str) -> Option<&str> {
        self.data
            .get("dependencies")
            .and_then(|d| d.get(name))
            .and_then(Value::as_str)
    }

    /// Replace the range of an existing runtime dependency
    ///
    /// Returns `false` when the dependency is not declared.
    pub fn set_dependency(&mut self, name: &str, range: &str) -> bool {
        match self
            .data
            .get_mut("dependencies")
            .and_then(Value::as_object_mut)
            .and_then(|deps| deps.get_mut(name))
        {
            Some(slot) => {
                *slot = Value::String(range.to_string());
                true
            }
            None => false,
        }
    }

    /// Names declared in the `resolutions` map
    pub fn resolution_names(&self) -> Vec<String> {
        self.data
            .get("resolutions")
            .and_then(Value::as_object)
            .map(|r| r.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn resolution(&self, name: &str) -> Option<&str> {
        self.data
            .get("resolutions")
            .and_then(|r| r.get(name))
            .and_then(Value::as_str)
    }

    pub fn set_resolution(&mut self, name: &str, version: &str) {
        if let Some(resolutions) = self
            .data
            .get_mut("resolutions")
            .and_then(Value::as_object_mut)
        {
            resolutions.insert(name.to_string(), Value::String(version.to_string()));
        }
    }

    /// Names listed in `pinnedDependencies`
    ///
    /// Entries may carry a tag suffix (`@salesforce/plugin-foo@latest-rc`);
    /// only the package name is returned.
    pub fn pinned_dependencies(&self) -> BTreeSet<String> {
        self.data
            .get("pinnedDependencies")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|entry| split_package_spec(entry).0.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// GitHub owner/repo declared in the `repository` field
    ///
    /// Accepts `owner/repo`, `github:owner/repo`, GitHub https/ssh URLs, and
    /// the object form `{ "url": ... }`.
    pub fn repository(&self) -> Result<RepoSlug> {
        let raw = match self.data.get("repository") {
            Some(Value::String(s)) => s.as_str(),
            Some(Value::Object(o)) => o.get("url").and_then(Value::as_str).ok_or_else(|| {
                ReleaseError::manifest("repository object has no 'url' field")
            })?,
            _ => return Err(ReleaseError::manifest("missing 'repository' field")),
        };

        parse_repository(raw).ok_or_else(|| {
            ReleaseError::manifest(format!("cannot determine GitHub owner/repo from '{}'", raw))
        })
    }

    fn required_str(&self, key: &str) -> Result<&str> {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| ReleaseError::manifest(format!("missing '{}' field", key)))
    }
}

/// Split `name@version` into name and optional version, honouring scopes
pub fn split_package_spec(spec: &str) -> (&str, Option<&str>) {
    let search_from = usize::from(spec.starts_with('@'));
    match spec[search_from..].find('@') {
        Some(idx) => {
            let at = search_from + idx;
            let version = &spec[at + 1..];
            (&spec[..at], (!version.is_empty()).then_some(version))
        }
        None => (spec, None),
    }
}

const REPOSITORY_PATTERN: &str = r"^(?:github:|git\+)?(?:(?:https?|ssh|git)://(?:[^@/]+@)?github\.com/|git@github\.com:)?([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?$";

fn parse_repository(raw: &str) -> Option<RepoSlug> {
    let re = Regex::new(REPOSITORY_PATTERN).ok()?;
    let caps = re.captures(raw.trim())?;
    Some(RepoSlug {
        owner: caps[1].to_string(),
        repo: caps[2].to_string(),
    })
}
