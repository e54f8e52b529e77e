//! In-memory manifest mutations applied during the version bump
//!
//! None of these functions write to disk; the orchestrator persists once after
//! the last of them has run.

use crate::error::Result;
use crate::manifest::{split_package_spec, Manifest};
use crate::registry::PackageRegistry;

/// Tag used for `--only` entries that name no version
const DEFAULT_ONLY_TAG: &str = "latest";

/// Set the manifest version
pub fn set_version(manifest: &mut Manifest, version: &str) {
    manifest.set_version(version);
}

/// Bump only the named dependencies
///
/// Each spec is `name` (resolved through the `latest` tag) or `name@version`
/// (a version or tag). Dependencies that are not declared, or whose range
/// already equals the target, are left alone.
///
/// # Returns
/// Names of the dependencies that actually changed, in request order
pub fn bump_only(
    manifest: &mut Manifest,
    registry: &dyn PackageRegistry,
    specs: &[String],
) -> Result<Vec<String>> {
    let mut changed = Vec::new();

    for spec in specs {
        let (name, requested) = split_package_spec(spec.trim());
        let Some(current) = manifest.dependency(name).map(str::to_string) else {
            continue;
        };

        let target = match requested {
            Some(version) if semver::Version::parse(version).is_ok() => version.to_string(),
            Some(tag) => registry.resolve(name, tag)?,
            None => registry.resolve(name, DEFAULT_ONLY_TAG)?,
        };

        if current != target && manifest.set_dependency(name, &target) {
            changed.push(name.to_string());
        }
    }

    Ok(changed)
}

/// Move every entry in `resolutions` to the version `tag` points at
pub fn bump_resolutions(
    manifest: &mut Manifest,
    registry: &dyn PackageRegistry,
    tag: &str,
) -> Result<Vec<String>> {
    let mut changed = Vec::new();

    for name in manifest.resolution_names() {
        let target = registry.resolve(&name, tag)?;
        if manifest.resolution(&name) != Some(target.as_str()) {
            manifest.set_resolution(&name, &target);
            changed.push(name);
        }
    }

    Ok(changed)
}

/// Pin each dependency listed in `pinnedDependencies` to the exact version
/// `tag` points at
pub fn pin_dependencies(
    manifest: &mut Manifest,
    registry: &dyn PackageRegistry,
    tag: &str,
) -> Result<Vec<String>> {
    let mut changed = Vec::new();

    for name in manifest.pinned_dependencies() {
        let Some(current) = manifest.dependency(&name).map(str::to_string) else {
            continue;
        };
        let target = registry.resolve(&name, tag)?;
        if current != target && manifest.set_dependency(&name, &target) {
            changed.push(name);
        }
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StaticRegistry;

    fn manifest() -> Manifest {
        Manifest::from_json(
            r#"{
  "name": "@salesforce/cli",
  "version": "2.1.0",
  "dependencies": {
    "@salesforce/plugin-auth": "2.8.0",
    "@salesforce/plugin-deploy": "1.0.0",
    "chalk": "^4.1.0"
  },
  "resolutions": {
    "@salesforce/schemas": "1.5.0"
  },
  "pinnedDependencies": ["@salesforce/plugin-auth", "@salesforce/plugin-deploy@latest-rc", "@salesforce/plugin-gone"]
}"#,
        )
        .unwrap()
    }

    fn registry() -> StaticRegistry {
        let mut registry = StaticRegistry::new();
        registry
            .add_tag("@salesforce/plugin-auth", "latest", "2.9.0")
            .add_tag("@salesforce/plugin-auth", "latest-rc", "2.10.0")
            .add_tag("@salesforce/plugin-deploy", "latest-rc", "1.0.0")
            .add_tag("@salesforce/schemas", "latest", "1.6.1");
        registry
    }

    #[test]
    fn test_bump_only_explicit_version() {
        let mut m = manifest();
        let changed = bump_only(&mut m, &registry(), &["chalk@4.1.2".to_string()]).unwrap();
        assert_eq!(changed, vec!["chalk"]);
        assert_eq!(m.dependency("chalk"), Some("4.1.2"));
    }

    #[test]
    fn test_bump_only_bare_name_uses_latest() {
        let mut m = manifest();
        let changed =
            bump_only(&mut m, &registry(), &["@salesforce/plugin-auth".to_string()]).unwrap();
        assert_eq!(changed, vec!["@salesforce/plugin-auth"]);
        assert_eq!(m.dependency("@salesforce/plugin-auth"), Some("2.9.0"));
    }

    #[test]
    fn test_bump_only_unknown_dependency_changes_nothing() {
        let mut m = manifest();
        let before = m.clone();
        let changed = bump_only(&mut m, &registry(), &["left-pad@1.3.0".to_string()]).unwrap();
        assert!(changed.is_empty());
        assert_eq!(m, before);
    }

    #[test]
    fn test_bump_only_same_version_is_not_a_change() {
        let mut m = manifest();
        let changed = bump_only(
            &mut m,
            &registry(),
            &["@salesforce/plugin-deploy@1.0.0".to_string()],
        )
        .unwrap();
        assert!(changed.is_empty());
    }

    #[test]
    fn test_bump_resolutions() {
        let mut m = manifest();
        let changed = bump_resolutions(&mut m, &registry(), "latest").unwrap();
        assert_eq!(changed, vec!["@salesforce/schemas"]);
        assert_eq!(m.resolution("@salesforce/schemas"), Some("1.6.1"));
    }

    #[test]
    fn test_pin_dependencies_skips_undeclared_and_unchanged() {
        let mut m = manifest();
        let changed = pin_dependencies(&mut m, &registry(), "latest-rc").unwrap();
        assert_eq!(changed, vec!["@salesforce/plugin-auth"]);
        assert_eq!(m.dependency("@salesforce/plugin-auth"), Some("2.10.0"));
        assert_eq!(m.dependency("@salesforce/plugin-deploy"), Some("1.0.0"));
    }
}
