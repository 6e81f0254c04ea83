//! Submitted form data

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

use crate::prelude::*;

/// Field name to raw value. Absent fields and JSON `null` are treated alike.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form(Map<String, Value>);

impl Form {
	pub fn new() -> Self {
		Self::default()
	}

	/// Form from a JSON request body; only objects are accepted
	pub fn from_json(value: Value) -> TgResult<Self> {
		match value {
			Value::Object(map) => Ok(Form(map)),
			Value::Null => Ok(Form::default()),
			_ => Err(Error::ValidationFailed(vec![ValidationError::new(
				"body",
				"INVALID_BODY",
				"Request body must be a JSON object",
			)])),
		}
	}

	pub fn get(&self, field: &str) -> Option<&Value> {
		self.0.get(field).filter(|v| !v.is_null())
	}

	pub fn get_str(&self, field: &str) -> Option<&str> {
		self.get(field).and_then(Value::as_str)
	}

	pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
		self.0.insert(field.into(), value.into());
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn into_inner(self) -> Map<String, Value> {
		self.0
	}
}

impl From<BTreeMap<String, String>> for Form {
	fn from(map: BTreeMap<String, String>) -> Self {
		map.into_iter().collect()
	}
}

impl From<HashMap<String, String>> for Form {
	fn from(map: HashMap<String, String>) -> Self {
		map.into_iter().collect()
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Form {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Form(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_null_reads_as_absent() {
		let form = Form::from_json(json!({ "a": null, "b": "x" })).unwrap();
		assert!(form.get("a").is_none());
		assert_eq!(form.get_str("b"), Some("x"));
	}

	#[test]
	fn test_from_json_rejects_non_objects() {
		assert!(Form::from_json(json!(null)).unwrap().is_empty());
		let err = Form::from_json(json!([1, 2])).unwrap_err();
		assert!(matches!(err, Error::ValidationFailed(ref errs) if &*errs[0].code == "INVALID_BODY"));
	}

	#[test]
	fn test_from_query_map() {
		let map: BTreeMap<String, String> = [("page".to_string(), "2".to_string())].into();
		let form = Form::from(map);
		assert_eq!(form.get("page"), Some(&json!("2")));
	}
}

// vim: ts=4
