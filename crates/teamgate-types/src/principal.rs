//! Authenticated principal and the role / subscription data it carries.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Member of the global permission catalog (e.g. `manage_team`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
	pub id: Box<str>,
	pub name: Box<str>,
}

/// Member of the global capability catalog (e.g. `teams`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
	pub id: Box<str>,
	pub name: Box<str>,
}

// Role //
//******//
/// Team role. The permission set is fixed once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
	pub id: Box<str>,
	pub name: Box<str>,
	#[serde(default)]
	pub description: Box<str>,
	#[serde(default)]
	pub permissions: BTreeSet<Box<str>>,
}

impl Role {
	pub fn has_permission(&self, permission: &str) -> bool {
		self.permissions.contains(permission)
	}
}

// Plan //
//******//
/// Subscription plan bundling a set of capabilities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
	pub id: Box<str>,
	pub name: Box<str>,
	#[serde(default)]
	pub capabilities: BTreeSet<Box<str>>,
}

// Subscription //
//**************//
/// Anything that can answer "does this grant capability X".
pub trait GrantsCapabilities: Send + Sync {
	fn grants(&self, capability: &str) -> bool;

	/// Containment check over a required set. Override when a subscription
	/// grants capabilities by some rule other than per-item lookup.
	fn grants_all(&self, required: &[&str]) -> bool {
		required.iter().all(|c| self.grants(c))
	}
}

/// An active subscription to a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
	pub id: Box<str>,
	pub plan: Box<str>,
	pub capabilities: BTreeSet<Box<str>>,
}

impl Subscription {
	pub fn for_plan(id: impl Into<Box<str>>, plan: &Plan) -> Self {
		Subscription { id: id.into(), plan: plan.id.clone(), capabilities: plan.capabilities.clone() }
	}
}

impl GrantsCapabilities for Subscription {
	fn grants(&self, capability: &str) -> bool {
		self.capabilities.contains(capability)
	}
}

// Principal //
//***********//
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
	User,
	Admin,
}

/// Resolved identity of the caller, attached to the request by the auth middleware.
#[derive(Debug, Clone)]
pub struct Principal {
	pub user_id: Box<str>,
	pub account_type: AccountType,
	pub team_id: Option<Box<str>>,
	pub role: Option<Arc<Role>>,
	pub subscription: Option<Arc<Subscription>>,
}

impl Principal {
	pub fn new(user_id: impl Into<Box<str>>, account_type: AccountType) -> Self {
		Principal {
			user_id: user_id.into(),
			account_type,
			team_id: None,
			role: None,
			subscription: None,
		}
	}

	pub fn with_team(mut self, team_id: impl Into<Box<str>>) -> Self {
		self.team_id = Some(team_id.into());
		self
	}

	pub fn with_role(mut self, role: Arc<Role>) -> Self {
		self.role = Some(role);
		self
	}

	pub fn with_subscription(mut self, subscription: Arc<Subscription>) -> Self {
		self.subscription = Some(subscription);
		self
	}

	pub fn is_admin(&self) -> bool {
		self.account_type == AccountType::Admin
	}

	pub fn summary(&self) -> PrincipalSummary {
		PrincipalSummary {
			user_id: self.user_id.clone(),
			account_type: self.account_type,
			team_id: self.team_id.clone(),
			role: self.role.as_ref().map(|r| r.id.clone()),
			plan: self.subscription.as_ref().map(|s| s.plan.clone()),
		}
	}
}

/// Serializable view of a principal
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalSummary {
	pub user_id: Box<str>,
	pub account_type: AccountType,
	pub team_id: Option<Box<str>>,
	pub role: Option<Box<str>>,
	pub plan: Option<Box<str>>,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn plan(caps: &[&str]) -> Plan {
		Plan {
			id: "pro".into(),
			name: "Pro".into(),
			capabilities: caps.iter().map(|c| Box::from(*c)).collect(),
		}
	}

	#[test]
	fn test_subscription_inherits_plan_capabilities() {
		let sub = Subscription::for_plan("sub_1", &plan(&["teams", "exports"]));
		assert_eq!(sub.plan.as_ref(), "pro");
		assert!(sub.grants("teams"));
		assert!(sub.grants_all(&["exports", "teams"]));
		assert!(!sub.grants_all(&["teams", "sso"]));
		assert!(sub.grants_all(&[]));
	}

	#[test]
	fn test_role_deserializes_without_optional_fields() {
		let role: Role =
			serde_json::from_str(r#"{"id": "member", "name": "Member"}"#).unwrap();
		assert!(role.permissions.is_empty());
		assert!(!role.has_permission("view_team"));
	}

	#[test]
	fn test_principal_summary() {
		let role = Arc::new(Role {
			id: "owner".into(),
			name: "Owner".into(),
			description: "".into(),
			permissions: BTreeSet::new(),
		});
		let principal = Principal::new("u1", AccountType::User).with_team("t1").with_role(role);
		let json = serde_json::to_value(principal.summary()).unwrap();
		assert_eq!(json["userId"], "u1");
		assert_eq!(json["accountType"], "user");
		assert_eq!(json["role"], "owner");
		assert!(json.get("plan").is_none());
		assert!(!principal.is_admin());
	}
}

// vim: ts=4
