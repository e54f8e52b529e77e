use std::fmt;

/// Category of version increment for a release
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BumpMode {
    /// Patch release cut from an older starting point
    Patch,
    /// Prerelease carrying the given label (e.g. "dev" or "dev.1")
    Prerelease(String),
    /// Regular release off the integration line
    #[default]
    Ordinary,
}

impl BumpMode {
    /// Build a bump mode from the mutually exclusive patch/prerelease inputs
    pub fn from_flags(patch: bool, prerelease: Option<String>) -> Self {
        match (patch, prerelease) {
            (_, Some(label)) => BumpMode::Prerelease(label),
            (true, None) => BumpMode::Patch,
            (false, None) => BumpMode::Ordinary,
        }
    }

    /// Branch name prefix for this bump mode
    pub fn branch_prefix(&self) -> &'static str {
        match self {
            BumpMode::Patch => "patch/",
            BumpMode::Prerelease(_) => "prerelease/",
            BumpMode::Ordinary => "",
        }
    }

    pub fn is_patch(&self) -> bool {
        matches!(self, BumpMode::Patch)
    }

    pub fn is_prerelease(&self) -> bool {
        matches!(self, BumpMode::Prerelease(_))
    }
}

impl fmt::Display for BumpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpMode::Patch => write!(f, "patch"),
            BumpMode::Prerelease(label) => write!(f, "prerelease ({})", label),
            BumpMode::Ordinary => write!(f, "ordinary"),
        }
    }
}
