//! Domain logic - pure release rules independent of git, npm or GitHub

pub mod branch;
pub mod bump;
pub mod identity;
pub mod request;

pub use branch::BranchPlan;
pub use bump::BumpMode;
pub use identity::{identity_updates, ConfigSet, GitIdentity};
pub use request::{DependencyPolicy, PublishMode, ReleaseRequest, StartingPoint};
