use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

const CONFIG_FILE_NAME: &str = "releasebranch.toml";

/// Represents the complete configuration for release-branch.
///
/// Holds the integration branch and remote, the external commands run during a
/// release, snapshot script selection, dependency policy tags and the review host.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_integration_branch")]
    pub integration_branch: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub commands: CommandsConfig,

    #[serde(default)]
    pub snapshot: SnapshotConfig,

    #[serde(default)]
    pub policies: PoliciesConfig,

    #[serde(default)]
    pub github: GitHubConfig,
}

fn default_integration_branch() -> String {
    "main".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// External commands run after the manifest is written.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommandsConfig {
    #[serde(default = "default_install")]
    pub install: String,

    #[serde(default = "default_dedupe")]
    pub dedupe: String,

    #[serde(default = "default_schema")]
    pub schema: String,
}

fn default_install() -> String {
    "yarn install".to_string()
}

fn default_dedupe() -> String {
    "npx yarn-deduplicate".to_string()
}

fn default_schema() -> String {
    "sf-release cli:schemas:collect".to_string()
}

impl Default for CommandsConfig {
    fn default() -> Self {
        CommandsConfig {
            install: default_install(),
            dedupe: default_dedupe(),
            schema: default_schema(),
        }
    }
}

/// Snapshot regeneration scripts, keyed by package name.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SnapshotConfig {
    #[serde(default = "default_snapshot_scripts")]
    pub scripts: HashMap<String, String>,

    #[serde(default = "default_snapshot_script")]
    pub default: String,
}

fn default_snapshot_scripts() -> HashMap<String, String> {
    let mut scripts = HashMap::new();
    scripts.insert(
        "sfdx-cli".to_string(),
        "./bin/dev.sh snapshot:generate".to_string(),
    );
    scripts
}

fn default_snapshot_script() -> String {
    "./bin/dev snapshot:generate".to_string()
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        SnapshotConfig {
            scripts: default_snapshot_scripts(),
            default: default_snapshot_script(),
        }
    }
}

impl SnapshotConfig {
    /// Returns the snapshot command for the given package name.
    pub fn script_for(&self, package_name: &str) -> &str {
        self.scripts
            .get(package_name)
            .map(String::as_str)
            .unwrap_or(&self.default)
    }
}

/// Distribution tags the dependency policies resolve against.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PoliciesConfig {
    #[serde(default = "default_resolutions_tag")]
    pub resolutions_tag: String,

    #[serde(default = "default_pinned_tag")]
    pub pinned_tag: String,
}

fn default_resolutions_tag() -> String {
    "latest".to_string()
}

fn default_pinned_tag() -> String {
    "latest-rc".to_string()
}

impl Default for PoliciesConfig {
    fn default() -> Self {
        PoliciesConfig {
            resolutions_tag: default_resolutions_tag(),
            pinned_tag: default_pinned_tag(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    crate::forge::github::DEFAULT_API_BASE.to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_base: default_api_base(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            integration_branch: default_integration_branch(),
            remote: default_remote(),
            commands: CommandsConfig::default(),
            snapshot: SnapshotConfig::default(),
            policies: PoliciesConfig::default(),
            github: GitHubConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasebranch.toml` in current directory
/// 3. `.releasebranch.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        read_config_file(Path::new(path))?
    } else if local.exists() {
        read_config_file(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            read_config_file(&config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| ReleaseError::config(e.to_string()))
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| ReleaseError::config(format!("Cannot read {}: {}", path.display(), e)))
}
