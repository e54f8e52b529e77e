use std::fmt;

use crate::domain::BumpMode;

/// Where the release branch starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartingPoint {
    /// Any ref git can check out: sha, branch or tag
    Ref(String),
    /// A distribution tag looked up in the package registry
    DistTag(String),
}

impl fmt::Display for StartingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartingPoint::Ref(r) => write!(f, "ref '{}'", r),
            StartingPoint::DistTag(t) => write!(f, "dist-tag '{}'", t),
        }
    }
}

/// Whether the run pushes and opens a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishMode {
    #[default]
    Publish,
    BuildOnly,
}

impl PublishMode {
    pub fn from_build_only(build_only: bool) -> Self {
        if build_only {
            PublishMode::BuildOnly
        } else {
            PublishMode::Publish
        }
    }

    pub fn is_publish(self) -> bool {
        self == PublishMode::Publish
    }
}

/// How dependency versions are moved during the bump
///
/// A restricted list and the resolution/pinning policies are alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyPolicy {
    /// Bump only these dependencies (`name` or `name@version`)
    Only(Vec<String>),
    Policies { resolutions: bool, pinned: bool },
}

impl Default for DependencyPolicy {
    fn default() -> Self {
        DependencyPolicy::Policies {
            resolutions: true,
            pinned: true,
        }
    }
}

impl DependencyPolicy {
    /// True when exactly one of the two policies is enabled
    pub fn is_split(&self) -> bool {
        matches!(
            self,
            DependencyPolicy::Policies { resolutions, pinned } if resolutions != pinned
        )
    }
}

/// Everything a release run needs to know from the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    pub start: StartingPoint,
    pub publish: PublishMode,
    pub dependencies: DependencyPolicy,
    pub bump: BumpMode,
    pub snapshot: bool,
    pub schema: bool,
}

impl ReleaseRequest {
    /// A publishing, ordinary release with default dependency policies
    pub fn new(start: StartingPoint) -> Self {
        ReleaseRequest {
            start,
            publish: PublishMode::default(),
            dependencies: DependencyPolicy::default(),
            bump: BumpMode::default(),
            snapshot: false,
            schema: false,
        }
    }

    pub fn with_bump(mut self, bump: BumpMode) -> Self {
        self.bump = bump;
        self
    }

    pub fn with_publish(mut self, publish: PublishMode) -> Self {
        self.publish = publish;
        self
    }

    pub fn with_dependencies(mut self, dependencies: DependencyPolicy) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_snapshot(mut self, snapshot: bool) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn with_schema(mut self, schema: bool) -> Self {
        self.schema = schema;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = ReleaseRequest::new(StartingPoint::DistTag("latest-rc".to_string()));
        assert_eq!(request.publish, PublishMode::Publish);
        assert_eq!(request.bump, BumpMode::Ordinary);
        assert_eq!(
            request.dependencies,
            DependencyPolicy::Policies {
                resolutions: true,
                pinned: true
            }
        );
        assert!(!request.snapshot);
        assert!(!request.schema);
    }

    #[test]
    fn test_split_policy_detection() {
        assert!(!DependencyPolicy::default().is_split());
        assert!(DependencyPolicy::Policies {
            resolutions: true,
            pinned: false
        }
        .is_split());
        assert!(!DependencyPolicy::Only(vec!["foo".to_string()]).is_split());
    }

    #[test]
    fn test_publish_mode_from_flag() {
        assert!(PublishMode::from_build_only(false).is_publish());
        assert!(!PublishMode::from_build_only(true).is_publish());
    }

    #[test]
    fn test_starting_point_display() {
        assert_eq!(
            StartingPoint::DistTag("latest-rc".to_string()).to_string(),
            "dist-tag 'latest-rc'"
        );
        assert_eq!(StartingPoint::Ref("abc1234".to_string()).to_string(), "ref 'abc1234'");
    }
}
