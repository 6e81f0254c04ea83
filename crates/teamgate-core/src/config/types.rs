//! Configuration registry and the frozen configuration it produces.
//!
//! Each crate registers its namespaced defaults into a mutable
//! `ConfigRegistry` at start-up. The registry is then frozen together with
//! the app-level overrides into an immutable `Config`, shared as
//! `Arc<Config>` for the rest of the process lifetime.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::prelude::*;

/// Mutable registry used during app initialization
#[derive(Debug, Default)]
pub struct ConfigRegistry {
	defaults: BTreeMap<String, Value>,
}

impl ConfigRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register framework defaults for a namespace
	pub fn register(&mut self, namespace: impl Into<String>, defaults: Value) -> TgResult<()> {
		let namespace = namespace.into();
		if self.defaults.contains_key(&namespace) {
			return Err(Error::ConfigError(format!(
				"Config namespace '{}' is already registered",
				namespace
			)));
		}

		debug!("Registering config namespace: {}", namespace);
		self.defaults.insert(namespace, defaults);
		Ok(())
	}

	/// Freeze with app-level overrides deep-merged over the defaults.
	///
	/// `overrides` must be an object keyed by namespace (or null for none).
	/// Overriding a namespace nobody registered is an error.
	pub fn freeze(self, overrides: Value) -> TgResult<Config> {
		let overrides = match overrides {
			Value::Null => Map::new(),
			Value::Object(map) => map,
			other => {
				return Err(Error::ConfigError(format!(
					"Config overrides must be a mapping of namespaces, got {}",
					type_name(&other)
				)));
			}
		};

		let mut values = self.defaults;
		for (namespace, value) in overrides {
			let Some(base) = values.get_mut(&namespace) else {
				return Err(Error::ConfigError(format!("Unknown config namespace '{}'", namespace)));
			};
			merge(base, value);
		}

		info!("Freezing config with {} namespaces", values.len());
		Ok(Config { values })
	}

	pub fn len(&self) -> usize {
		self.defaults.len()
	}

	pub fn is_empty(&self) -> bool {
		self.defaults.is_empty()
	}
}

/// Deep-merge `over` into `base`: objects merge key by key, anything else
/// is replaced by the override.
pub fn merge(base: &mut Value, over: Value) {
	match (base, over) {
		(Value::Object(base), Value::Object(over)) => {
			for (key, value) in over {
				match base.get_mut(&key) {
					Some(slot) => merge(slot, value),
					None => {
						base.insert(key, value);
					}
				}
			}
		}
		(base, over) => *base = over,
	}
}

fn type_name(v: &Value) -> &'static str {
	match v {
		Value::Null => "null",
		Value::Bool(_) => "bool",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

// Config //
//********//
/// Immutable, resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
	values: BTreeMap<String, Value>,
}

impl Config {
	/// Look up a dot-separated `key_path` inside `namespace`.
	///
	/// An empty path returns the whole namespace.
	pub fn get(&self, namespace: &str, key_path: &str) -> Option<&Value> {
		let mut cur = self.values.get(namespace)?;
		for part in key_path.split('.').filter(|p| !p.is_empty()) {
			cur = match cur {
				Value::Object(map) => map.get(part)?,
				Value::Array(list) => list.get(part.parse::<usize>().ok()?)?,
				_ => return None,
			};
		}
		Some(cur)
	}

	pub fn get_str(&self, namespace: &str, key_path: &str) -> Option<&str> {
		self.get(namespace, key_path).and_then(Value::as_str)
	}

	pub fn get_i64(&self, namespace: &str, key_path: &str) -> Option<i64> {
		self.get(namespace, key_path).and_then(Value::as_i64)
	}

	pub fn get_bool(&self, namespace: &str, key_path: &str) -> Option<bool> {
		self.get(namespace, key_path).and_then(Value::as_bool)
	}

	/// Typed lookup falling back to `default` when missing or mistyped
	pub fn get_or<T: DeserializeOwned>(&self, namespace: &str, key_path: &str, default: T) -> T {
		match self.get(namespace, key_path) {
			Some(value) => match serde_json::from_value(value.clone()) {
				Ok(v) => v,
				Err(e) => {
					warn!("Config '{}.{}' has unexpected type: {}", namespace, key_path, e);
					default
				}
			},
			None => default,
		}
	}

	/// Typed lookup of a required key
	pub fn require<T: DeserializeOwned>(&self, namespace: &str, key_path: &str) -> TgResult<T> {
		let value = self.get(namespace, key_path).ok_or_else(|| {
			Error::ConfigError(format!("Missing config '{}.{}'", namespace, key_path))
		})?;
		serde_json::from_value(value.clone()).map_err(|e| {
			Error::ConfigError(format!("Invalid config '{}.{}': {}", namespace, key_path, e))
		})
	}

	/// `features.<name>`; missing flags are disabled
	pub fn is_feature_enabled(&self, name: &str) -> bool {
		self.get("features", name).and_then(Value::as_bool).unwrap_or(false)
	}

	pub fn namespaces(&self) -> impl Iterator<Item = &str> {
		self.values.keys().map(String::as_str)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn registry() -> ConfigRegistry {
		let mut reg = ConfigRegistry::new();
		reg.register("app", json!({ "name": "Teamgate", "mail": { "from": "noreply@localhost", "port": 25 } }))
			.unwrap();
		reg.register("features", json!({ "teams": true, "admin": false })).unwrap();
		reg
	}

	#[test]
	fn test_default_used_without_override() {
		let config = registry().freeze(Value::Null).unwrap();
		assert_eq!(config.get_str("app", "name"), Some("Teamgate"));
		assert_eq!(config.get_i64("app", "mail.port"), Some(25));
	}

	#[test]
	fn test_override_beats_default_and_keeps_siblings() {
		let config =
			registry().freeze(json!({ "app": { "mail": { "port": 587 } } })).unwrap();
		assert_eq!(config.get_i64("app", "mail.port"), Some(587));
		assert_eq!(config.get_str("app", "mail.from"), Some("noreply@localhost"));
		assert_eq!(config.get_str("app", "name"), Some("Teamgate"));
	}

	#[test]
	fn test_missing_keys() {
		let config = registry().freeze(Value::Null).unwrap();
		assert!(config.get("app", "nope").is_none());
		assert!(config.get("app", "name.deeper").is_none());
		assert!(config.get("nope", "").is_none());
		assert_eq!(config.get_or("app", "retries", 3u32), 3);
		assert!(config.require::<String>("app", "nope").is_err());
	}

	#[test]
	fn test_unknown_namespace_override_rejected() {
		let res = registry().freeze(json!({ "ap": { "name": "typo" } }));
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_overrides_must_be_a_mapping() {
		assert!(registry().freeze(json!(["app"])).is_err());
	}

	#[test]
	fn test_duplicate_namespace_rejected() {
		let mut reg = registry();
		assert!(reg.register("app", json!({})).is_err());
		assert_eq!(reg.len(), 2);
	}

	#[test]
	fn test_feature_flags() {
		let config = registry().freeze(json!({ "features": { "admin": true, "beta": true } })).unwrap();
		assert!(config.is_feature_enabled("teams"));
		assert!(config.is_feature_enabled("admin"));
		assert!(config.is_feature_enabled("beta"));
		assert!(!config.is_feature_enabled("billing"));
	}

	#[test]
	fn test_arrays_are_replaced_and_indexable() {
		let mut reg = ConfigRegistry::new();
		reg.register("catalog", json!({ "roles": [{ "id": "a" }, { "id": "b" }] })).unwrap();
		let config = reg.freeze(json!({ "catalog": { "roles": [{ "id": "c" }] } })).unwrap();
		assert_eq!(config.get_str("catalog", "roles.0.id"), Some("c"));
		assert!(config.get("catalog", "roles.1").is_none());
	}
}

// vim: ts=4
