use thiserror::Error;

/// Unified error type for release-branch operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Distribution tag '{tag}' not found for package '{package}'")]
    Resolution { tag: String, package: String },

    #[error(
        "No version changes made for [{}]. Confirm you are passing the correct dependency and version to --only.",
        requested.join(", ")
    )]
    NoChanges { requested: Vec<String> },

    #[error("Command `{command}` failed: {message}")]
    Command { command: String, message: String },

    #[error("API request failed: {0}")]
    Api(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credential: {0}")]
    Credential(String),

    #[error("Cannot quote shell argument: {0}")]
    Quote(#[from] shlex::QuoteError),

    #[error("Git repository error: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in release-branch
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a resolution error for a missing distribution tag
    pub fn resolution(tag: impl Into<String>, package: impl Into<String>) -> Self {
        ReleaseError::Resolution {
            tag: tag.into(),
            package: package.into(),
        }
    }

    /// Create a command error with the failing command line
    pub fn command(command: impl Into<String>, message: impl Into<String>) -> Self {
        ReleaseError::Command {
            command: command.into(),
            message: message.into(),
        }
    }

    pub fn api(msg: impl Into<String>) -> Self {
        ReleaseError::Api(msg.into())
    }

    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseError::Manifest(msg.into())
    }

    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    pub fn credential(msg: impl Into<String>) -> Self {
        ReleaseError::Credential(msg.into())
    }
}
