// tests/config_test.rs
use release_branch::config::{load_config, Config};
use release_branch::ReleaseError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.integration_branch, "main");
    assert_eq!(config.remote, "origin");
    assert_eq!(config.commands.install, "yarn install");
    assert_eq!(config.commands.dedupe, "npx yarn-deduplicate");
    assert_eq!(config.commands.schema, "sf-release cli:schemas:collect");
    assert_eq!(config.policies.resolutions_tag, "latest");
    assert_eq!(config.policies.pinned_tag, "latest-rc");
    assert_eq!(config.github.api_base, "https://api.github.com");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
integration_branch = "develop"

[commands]
install = "npm ci"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.integration_branch, "develop");
    assert_eq!(config.commands.install, "npm ci");
    // Unset keys fall back to defaults
    assert_eq!(config.commands.dedupe, "npx yarn-deduplicate");
    assert_eq!(config.remote, "origin");
}

#[test]
fn test_snapshot_defaults() {
    let config = Config::default();
    assert_eq!(
        config.snapshot.script_for("sfdx-cli"),
        "./bin/dev.sh snapshot:generate"
    );
    assert_eq!(
        config.snapshot.script_for("@salesforce/cli"),
        "./bin/dev snapshot:generate"
    );
}

#[test]
fn test_overrides_from_fixture() {
    let config = load_config(Some("tests/fixtures/config_with_overrides.toml"))
        .expect("Failed to load test config");
    assert_eq!(config.integration_branch, "develop");
    assert_eq!(config.remote, "upstream");
    assert_eq!(config.commands.install, "npm install");
    assert_eq!(config.commands.dedupe, "npm dedupe");
    assert_eq!(config.policies.pinned_tag, "nightly");
    assert_eq!(
        config.snapshot.script_for("@salesforce/cli"),
        "./bin/dev.js snapshot:generate"
    );
    assert_eq!(
        config.snapshot.script_for("sfdx-cli"),
        "./bin/run snapshot:generate"
    );
    assert_eq!(config.github.api_base, "https://github.example.com/api/v3/");
}

#[test]
fn test_invalid_toml_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"integration_branch = [").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
}
