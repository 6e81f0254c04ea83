//! Role, permission, capability and plan catalogs.
//!
//! Loaded once from the `catalog` config namespace and shared read-only.
//! References to unknown permissions or capabilities are dropped at load
//! time, so a stale or misspelled id can only ever grant less.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::config::Config;
use crate::prelude::*;
use teamgate_types::principal::{Capability, Permission, Plan, Role, Subscription};

#[derive(Debug, Default, Deserialize)]
struct CatalogSource {
	#[serde(default)]
	permissions: Vec<Permission>,
	#[serde(default)]
	capabilities: Vec<Capability>,
	#[serde(default)]
	roles: Vec<Role>,
	#[serde(default)]
	plans: Vec<Plan>,
}

#[derive(Debug, Default)]
pub struct Catalog {
	permissions: BTreeMap<Box<str>, Permission>,
	capabilities: BTreeMap<Box<str>, Capability>,
	roles: BTreeMap<Box<str>, Arc<Role>>,
	plans: BTreeMap<Box<str>, Arc<Plan>>,
}

fn insert_unique<T>(map: &mut BTreeMap<Box<str>, T>, kind: &str, id: &str, item: T) -> TgResult<()> {
	if map.insert(id.into(), item).is_some() {
		return Err(Error::ConfigError(format!("Duplicate {} id '{}' in catalog", kind, id)));
	}
	Ok(())
}

/// Keep only ids present in `known`
fn retain_known<T>(
	ids: BTreeSet<Box<str>>,
	known: &BTreeMap<Box<str>, T>,
	kind: &str,
	owner: &str,
) -> BTreeSet<Box<str>> {
	ids.into_iter()
		.filter(|id| {
			let ok = known.contains_key(id);
			if !ok {
				warn!("Dropping unknown {} '{}' from '{}'", kind, id, owner);
			}
			ok
		})
		.collect()
}

impl Catalog {
	pub fn from_config(config: &Config) -> TgResult<Catalog> {
		let source: CatalogSource = match config.get("catalog", "") {
			Some(value) => serde_json::from_value(value.clone())
				.map_err(|e| Error::ConfigError(format!("Invalid catalog: {}", e)))?,
			None => CatalogSource::default(),
		};

		let mut catalog = Catalog::default();
		for p in source.permissions {
			let id = p.id.clone();
			insert_unique(&mut catalog.permissions, "permission", &id, p)?;
		}
		for c in source.capabilities {
			let id = c.id.clone();
			insert_unique(&mut catalog.capabilities, "capability", &id, c)?;
		}
		for mut role in source.roles {
			role.permissions =
				retain_known(role.permissions, &catalog.permissions, "permission", &role.id);
			let id = role.id.clone();
			insert_unique(&mut catalog.roles, "role", &id, Arc::new(role))?;
		}
		for mut plan in source.plans {
			plan.capabilities =
				retain_known(plan.capabilities, &catalog.capabilities, "capability", &plan.id);
			let id = plan.id.clone();
			insert_unique(&mut catalog.plans, "plan", &id, Arc::new(plan))?;
		}

		info!(
			"Catalog loaded: {} permissions, {} capabilities, {} roles, {} plans",
			catalog.permissions.len(),
			catalog.capabilities.len(),
			catalog.roles.len(),
			catalog.plans.len()
		);
		Ok(catalog)
	}

	pub fn role(&self, id: &str) -> Option<Arc<Role>> {
		self.roles.get(id).cloned()
	}

	pub fn plan(&self, id: &str) -> Option<Arc<Plan>> {
		self.plans.get(id).cloned()
	}

	pub fn permission(&self, id: &str) -> Option<&Permission> {
		self.permissions.get(id)
	}

	pub fn capability(&self, id: &str) -> Option<&Capability> {
		self.capabilities.get(id)
	}

	/// Subscription to a catalog plan; `None` when the plan is unknown
	pub fn subscription(&self, id: &str, plan_id: &str) -> Option<Subscription> {
		self.plans.get(plan_id).map(|plan| Subscription::for_plan(id, plan))
	}

	pub fn roles(&self) -> impl Iterator<Item = &Arc<Role>> {
		self.roles.values()
	}

	pub fn plans(&self) -> impl Iterator<Item = &Arc<Plan>> {
		self.plans.values()
	}

	pub fn permissions(&self) -> impl Iterator<Item = &Permission> {
		self.permissions.values()
	}

	pub fn capabilities(&self) -> impl Iterator<Item = &Capability> {
		self.capabilities.values()
	}

	pub fn role_ids(&self) -> Vec<&str> {
		self.roles.keys().map(AsRef::as_ref).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ConfigRegistry;
	use serde_json::json;

	fn config(catalog: serde_json::Value) -> Config {
		let mut reg = ConfigRegistry::new();
		reg.register("catalog", catalog).unwrap();
		reg.freeze(serde_json::Value::Null).unwrap()
	}

	#[test]
	fn test_default_catalog() {
		let mut reg = ConfigRegistry::new();
		crate::register_defaults(&mut reg).unwrap();
		let catalog = Catalog::from_config(&reg.freeze(serde_json::Value::Null).unwrap()).unwrap();

		assert_eq!(catalog.role_ids(), ["manager", "member", "owner"]);
		assert!(catalog.role("owner").unwrap().has_permission("manage_billing"));
		assert!(catalog.plan("pro").unwrap().capabilities.contains("exports"));
		assert_eq!(catalog.permission("view_team").unwrap().name.as_ref(), "View team");
		assert!(catalog.capability("teams").is_some());
	}

	#[test]
	fn test_unknown_references_are_dropped() {
		let catalog = Catalog::from_config(&config(json!({
			"permissions": [{ "id": "view_team", "name": "View" }],
			"capabilities": [{ "id": "teams", "name": "Teams" }],
			"roles": [{ "id": "member", "name": "Member", "permissions": ["view_team", "launch_rockets"] }],
			"plans": [{ "id": "starter", "name": "Starter", "capabilities": ["teams", "sso"] }],
		})))
		.unwrap();

		let role = catalog.role("member").unwrap();
		assert!(role.has_permission("view_team"));
		assert!(!role.has_permission("launch_rockets"));
		assert_eq!(role.permissions.len(), 1);

		let plan = catalog.plan("starter").unwrap();
		assert_eq!(plan.capabilities.len(), 1);
	}

	#[test]
	fn test_unknown_ids_resolve_to_none() {
		let catalog = Catalog::from_config(&config(json!({}))).unwrap();
		assert!(catalog.role("owner").is_none());
		assert!(catalog.plan("pro").is_none());
		assert!(catalog.subscription("sub_1", "pro").is_none());
	}

	#[test]
	fn test_subscription_from_plan() {
		let catalog = Catalog::from_config(&config(json!({
			"capabilities": [{ "id": "teams", "name": "Teams" }],
			"plans": [{ "id": "starter", "name": "Starter", "capabilities": ["teams"] }],
		})))
		.unwrap();
		let sub = catalog.subscription("sub_1", "starter").unwrap();
		assert_eq!(sub.id.as_ref(), "sub_1");
		assert!(sub.capabilities.contains("teams"));
	}

	#[test]
	fn test_duplicate_role_rejected() {
		let res = Catalog::from_config(&config(json!({
			"roles": [{ "id": "a", "name": "A" }, { "id": "a", "name": "A again" }],
		})));
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_malformed_catalog_rejected() {
		let res = Catalog::from_config(&config(json!({ "roles": "owner" })));
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}
}

// vim: ts=4
