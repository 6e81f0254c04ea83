//! Access control decisions.
//!
//! Pure functions over a caller's subscription and role. Nothing here logs
//! or touches shared state; the gate middleware in `crate::gate` turns a
//! `false` into a typed error.

use teamgate_types::principal::{GrantsCapabilities, Role};

/// Check that a subscription grants every required capability.
///
/// Without a subscription only capability-free resources are reachable.
pub fn has_capabilities<G>(subscription: Option<&G>, required: &[&str]) -> bool
where
	G: GrantsCapabilities + ?Sized,
{
	match subscription {
		Some(sub) => sub.grants_all(required),
		None => required.is_empty(),
	}
}

/// Check that a role holds every required permission.
///
/// A missing role has the empty permission set.
pub fn has_permissions(role: Option<&Role>, required: &[&str]) -> bool {
	required.iter().all(|p| role.is_some_and(|r| r.has_permission(p)))
}

/// Both checks; the permission check is skipped once capabilities fail.
pub fn can_access_resource<G>(
	subscription: Option<&G>,
	required_capabilities: &[&str],
	role: Option<&Role>,
	required_permissions: &[&str],
) -> bool
where
	G: GrantsCapabilities + ?Sized,
{
	has_capabilities(subscription, required_capabilities)
		&& has_permissions(role, required_permissions)
}

/// Required permissions the role lacks, deduplicated, in the order required
pub fn missing_permissions<'a>(role: Option<&Role>, required: &[&'a str]) -> Vec<&'a str> {
	let mut missing: Vec<&str> = Vec::new();
	for &p in required {
		if !role.is_some_and(|r| r.has_permission(p)) && !missing.contains(&p) {
			missing.push(p);
		}
	}
	missing
}


// vim: ts=4
