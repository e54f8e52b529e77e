//! Starting-point and next-version resolution

use crate::domain::{BumpMode, StartingPoint};
use crate::error::{ReleaseError, Result};
use crate::registry::PackageRegistry;
use crate::ui;
use crate::version::VersionArithmetic;

/// Resolve the git ref the release starts from
///
/// An explicit ref is returned unchanged. A distribution tag is looked up in
/// the package's published tag map.
///
/// # Returns
/// * `Ok(String)` - Ref to check out
/// * `Err(ReleaseError::Resolution)` - If the tag is not published
pub fn resolve_starting_ref(
    start: &StartingPoint,
    package: &str,
    registry: &dyn PackageRegistry,
) -> Result<String> {
    match start {
        StartingPoint::Ref(reference) => {
            ui::display_status(&format!("Starting from {}, switching to it", start));
            Ok(reference.clone())
        }
        StartingPoint::DistTag(tag) => {
            ui::display_status(&format!(
                "Starting from {}, looking up version for {}",
                start, package
            ));
            registry
                .dist_tags(package)?
                .remove(tag)
                .ok_or_else(|| ReleaseError::resolution(tag, package))
        }
    }
}

/// Compute the next version through the version-arithmetic collaborator
pub fn resolve_next_version(
    current: &str,
    bump: &BumpMode,
    arithmetic: &dyn VersionArithmetic,
) -> Result<String> {
    arithmetic.next_version(current, bump)
}
