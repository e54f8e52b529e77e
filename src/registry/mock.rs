use std::collections::{BTreeMap, HashMap};

use crate::error::{ReleaseError, Result};
use crate::registry::PackageRegistry;

/// In-memory registry for tests
///
/// Each package has a tag map; `resolve` looks the tag up first and otherwise
/// treats the argument as an exact version.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    packages: HashMap<String, BTreeMap<String, String>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point `tag` of `package` at `version`
    pub fn add_tag(
        &mut self,
        package: impl Into<String>,
        tag: impl Into<String>,
        version: impl Into<String>,
    ) -> &mut Self {
        self.packages
            .entry(package.into())
            .or_default()
            .insert(tag.into(), version.into());
        self
    }
}

impl PackageRegistry for StaticRegistry {
    fn dist_tags(&self, package: &str) -> Result<BTreeMap<String, String>> {
        Ok(self.packages.get(package).cloned().unwrap_or_default())
    }

    fn resolve(&self, package: &str, tag_or_range: &str) -> Result<String> {
        let tags = self
            .packages
            .get(package)
            .ok_or_else(|| ReleaseError::resolution(tag_or_range, package))?;

        match tags.get(tag_or_range) {
            Some(version) => Ok(version.clone()),
            None if semver::Version::parse(tag_or_range).is_ok() => Ok(tag_or_range.to_string()),
            None => Err(ReleaseError::resolution(tag_or_range, package)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_registry_tags() {
        let mut registry = StaticRegistry::new();
        registry
            .add_tag("foo", "latest", "1.0.0")
            .add_tag("foo", "latest-rc", "1.1.0");

        assert_eq!(registry.dist_tags("foo").unwrap().len(), 2);
        assert!(registry.dist_tags("bar").unwrap().is_empty());
        assert_eq!(registry.resolve("foo", "latest-rc").unwrap(), "1.1.0");
        assert_eq!(registry.resolve("foo", "0.9.0").unwrap(), "0.9.0");
        assert!(registry.resolve("foo", "nightly").is_err());
        assert!(registry.resolve("bar", "latest").is_err());
    }
}
