//! App-level override file loading (YAML)

use serde_json::Value;
use std::path::Path;

use crate::prelude::*;

/// Parse override YAML into a JSON value keyed by namespace
pub fn parse_overrides(yaml: &str) -> TgResult<Value> {
	if yaml.trim().is_empty() {
		return Ok(Value::Null);
	}
	serde_yaml::from_str::<Value>(yaml)
		.map_err(|e| Error::ConfigError(format!("Invalid config file: {}", e)))
}

/// Read and parse an override file
pub async fn load_overrides(path: impl AsRef<Path>) -> TgResult<Value> {
	let path = path.as_ref();
	let text = tokio::fs::read_to_string(path).await.map_err(|e| {
		Error::ConfigError(format!("Cannot read config file {}: {}", path.display(), e))
	})?;
	info!("Loaded config overrides from {}", path.display());
	parse_overrides(&text)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ConfigRegistry;

	#[test]
	fn test_parse_nested_yaml() {
		let value = parse_overrides(
			"auth:\n  jwt_secret: s3cret\nfeatures:\n  admin: false\n",
		)
		.unwrap();
		assert_eq!(value["auth"]["jwt_secret"], "s3cret");
		assert_eq!(value["features"]["admin"], false);
	}

	#[test]
	fn test_empty_file_means_no_overrides() {
		assert_eq!(parse_overrides("  \n").unwrap(), Value::Null);
	}

	#[test]
	fn test_invalid_yaml() {
		assert!(matches!(parse_overrides("auth: [unclosed"), Err(Error::ConfigError(_))));
	}

	#[tokio::test]
	async fn test_load_file_and_freeze() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("teamgate.yaml");
		tokio::fs::write(&path, "access:\n  subscription_redirect: /billing\n").await.unwrap();

		let mut registry = ConfigRegistry::new();
		crate::register_defaults(&mut registry).unwrap();
		let config = registry.freeze(load_overrides(&path).await.unwrap()).unwrap();
		assert_eq!(config.get_str("access", "subscription_redirect"), Some("/billing"));
	}

	#[tokio::test]
	async fn test_missing_file() {
		let res = load_overrides("/nonexistent/teamgate.yaml").await;
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}
}

// vim: ts=4
