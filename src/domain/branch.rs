use crate::domain::BumpMode;

/// Branch name and pull-request base derived from a bump mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPlan {
    pub branch: String,
    pub pr_base: String,
}

impl BranchPlan {
    /// Derive the plan for a release
    ///
    /// Patch releases target their own branch so a later merge stays on the
    /// patch lineage; everything else targets the integration branch.
    pub fn new(bump: &BumpMode, next_version: &str, integration_branch: &str) -> Self {
        let branch = format!("{}{}", bump.branch_prefix(), next_version);
        let pr_base = if bump.is_patch() {
            branch.clone()
        } else {
            integration_branch.to_string()
        };

        BranchPlan { branch, pr_base }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_plan_targets_itself() {
        let plan = BranchPlan::new(&BumpMode::Patch, "1.2.4", "main");
        assert_eq!(plan.branch, "patch/1.2.4");
        assert_eq!(plan.pr_base, "patch/1.2.4");
    }

    #[test]
    fn test_prerelease_plan_targets_integration_branch() {
        let plan = BranchPlan::new(
            &BumpMode::Prerelease("dev.0".to_string()),
            "1.3.0-dev.0",
            "main",
        );
        assert_eq!(plan.branch, "prerelease/1.3.0-dev.0");
        assert_eq!(plan.pr_base, "main");
    }

    #[test]
    fn test_ordinary_plan_has_no_prefix() {
        let plan = BranchPlan::new(&BumpMode::Ordinary, "1.3.0", "develop");
        assert_eq!(plan.branch, "1.3.0");
        assert_eq!(plan.pr_base, "develop");
    }
}
