//! Validation rules and the predicates they are built from.
//!
//! A rule's predicate returns `true` when the value FAILS. Predicates that
//! detect validity (`is_integer`, `is_email`, ...) are turned into failure
//! predicates with `invert`. Validity checks accept an empty value; only
//! `rules::required` reports emptiness.

use regex::Regex;
use serde_json::Value;
use std::sync::{Arc, LazyLock};

use crate::prelude::*;

pub type Predicate = Arc<dyn Fn(Option<&Value>) -> bool + Send + Sync>;

/// Predicate that fails exactly when `pred` passes
pub fn invert(pred: Predicate) -> Predicate {
	Arc::new(move |value: Option<&Value>| !pred(value))
}

static EMAIL_RE: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

// Predicates //
//************//
pub fn is_empty(value: Option<&Value>) -> bool {
	match value {
		None | Some(Value::Null) => true,
		Some(Value::String(s)) => s.trim().is_empty(),
		Some(Value::Array(a)) => a.is_empty(),
		Some(Value::Object(o)) => o.is_empty(),
		Some(_) => false,
	}
}

/// Integer value of a JSON number or a decimal string
pub fn as_integer(value: &Value) -> Option<i64> {
	match value {
		Value::Number(n) => n.as_i64(),
		Value::String(s) => s.trim().parse().ok(),
		_ => None,
	}
}

fn as_text(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	}
}

pub fn is_integer(value: Option<&Value>) -> bool {
	is_empty(value) || value.and_then(as_integer).is_some()
}

pub fn is_number(value: Option<&Value>) -> bool {
	is_empty(value)
		|| match value {
			Some(Value::Number(_)) => true,
			Some(Value::String(s)) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
			_ => false,
		}
}

pub fn is_email(value: Option<&Value>) -> bool {
	if is_empty(value) {
		return true;
	}
	match (value.and_then(Value::as_str), EMAIL_RE.as_ref()) {
		(Some(s), Some(re)) => re.is_match(s.trim()),
		_ => false,
	}
}

pub fn is_in_list(list: &[&str]) -> Predicate {
	let list: Vec<String> = list.iter().map(|s| s.to_string()).collect();
	Arc::new(move |value: Option<&Value>| {
		is_empty(value) || value.and_then(as_text).is_some_and(|v| list.iter().any(|item| *item == v))
	})
}

/// Fails on strings longer than `max` characters
pub fn is_longer_than(max: usize) -> Predicate {
	Arc::new(move |value: Option<&Value>| matches!(value, Some(Value::String(s)) if s.chars().count() > max))
}

// Rule //
//******//
#[derive(Clone)]
pub struct Rule {
	check: Predicate,
	pub code: Box<str>,
	pub title: Box<str>,
	pub meta: Option<Value>,
}

impl Rule {
	pub fn new(check: Predicate, code: impl Into<Box<str>>, title: impl Into<Box<str>>) -> Self {
		Rule { check, code: code.into(), title: title.into(), meta: None }
	}

	pub fn meta(mut self, meta: Value) -> Self {
		self.meta = Some(meta);
		self
	}

	pub fn fails(&self, value: Option<&Value>) -> bool {
		(self.check)(value)
	}

	pub fn error(&self, field: &str) -> ValidationError {
		let err = ValidationError::new(field, self.code.clone(), self.title.clone());
		match &self.meta {
			Some(meta) => err.with_meta(meta.clone()),
			None => err,
		}
	}
}

impl std::fmt::Debug for Rule {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Rule").field("code", &self.code).finish_non_exhaustive()
	}
}

/// Ready-made rules
pub mod rules {
	use super::*;

	pub fn required() -> Rule {
		Rule::new(Arc::new(is_empty), "EMPTY", "Required field")
	}

	pub fn integer() -> Rule {
		Rule::new(invert(Arc::new(is_integer)), "INVALID_INTEGER", "Must be an integer")
	}

	pub fn number() -> Rule {
		Rule::new(invert(Arc::new(is_number)), "INVALID_NUMBER", "Must be a number")
	}

	pub fn email() -> Rule {
		Rule::new(invert(Arc::new(is_email)), "INVALID_EMAIL", "Must be a valid email address")
	}

	pub fn in_list(list: &[&str]) -> Rule {
		Rule::new(invert(is_in_list(list)), "NOT_IN_LIST", "Must be one of the allowed values")
			.meta(serde_json::json!({ "list": list }))
	}

	pub fn max_length(max: usize) -> Rule {
		Rule::new(is_longer_than(max), "TOO_LONG", format!("Must be at most {} characters", max))
			.meta(serde_json::json!({ "max": max }))
	}
}


// vim: ts=4
