//! Field/model presentation layer.
//!
//! A `Model` declares which fields of a raw row (as stored) are exposed and
//! how each is turned into a client-ready value. Undeclared fields are
//! dropped. Null or missing values stay null, and values a field cannot
//! convert are passed through unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Type alias for custom presenter functions
pub type Presenter = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

#[derive(Clone)]
pub enum Field {
	/// Rendered as a string
	Text,
	/// Rendered as a number rounded to `decimals` places
	Number { decimals: u8 },
	/// Unix seconds or RFC 3339 / `YYYY-MM-DD` input, rendered with a chrono format string
	Date { format: Box<str> },
	/// Integer minor units (cents), rendered as `"12.34 USD"`
	Currency { code: Box<str> },
	/// Raw value mapped to a display label
	Enum { labels: Box<[(Box<str>, Box<str>)]> },
	Custom(Presenter),
}

impl std::fmt::Debug for Field {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Field::Text => write!(f, "Text"),
			Field::Number { decimals } => write!(f, "Number({})", decimals),
			Field::Date { format } => write!(f, "Date({})", format),
			Field::Currency { code } => write!(f, "Currency({})", code),
			Field::Enum { labels } => write!(f, "Enum({} labels)", labels.len()),
			Field::Custom(_) => write!(f, "Custom"),
		}
	}
}

impl Field {
	pub fn date() -> Self {
		Field::Date { format: "%Y-%m-%d".into() }
	}

	pub fn currency(code: impl Into<Box<str>>) -> Self {
		Field::Currency { code: code.into() }
	}

	pub fn enumeration<'a>(labels: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
		Field::Enum { labels: labels.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
	}

	pub fn custom<F>(f: F) -> Self
	where
		F: Fn(&Value) -> Value + Send + Sync + 'static,
	{
		Field::Custom(Arc::new(f))
	}

	/// Convert a raw value into its presentation form
	pub fn present(&self, raw: &Value) -> Value {
		if raw.is_null() {
			return Value::Null;
		}
		match self {
			Field::Text => match raw {
				Value::String(_) => raw.clone(),
				Value::Number(n) => Value::String(n.to_string()),
				Value::Bool(b) => Value::String(b.to_string()),
				_ => raw.clone(),
			},
			Field::Number { decimals } => match as_f64(raw) {
				Some(n) => {
					let factor = 10f64.powi(i32::from(*decimals));
					serde_json::Number::from_f64((n * factor).round() / factor)
						.map_or_else(|| raw.clone(), Value::Number)
				}
				None => raw.clone(),
			},
			Field::Date { format } => match as_datetime(raw) {
				Some(dt) => Value::String(dt.format(format).to_string()),
				None => raw.clone(),
			},
			Field::Currency { code } => match as_i64(raw) {
				Some(minor) => {
					let sign = if minor < 0 { "-" } else { "" };
					let abs = minor.unsigned_abs();
					Value::String(format!("{}{}.{:02} {}", sign, abs / 100, abs % 100, code))
				}
				None => raw.clone(),
			},
			Field::Enum { labels } => {
				let key = match raw {
					Value::String(s) => s.clone(),
					other => other.to_string(),
				};
				labels
					.iter()
					.find(|(k, _)| **k == *key)
					.map_or_else(|| raw.clone(), |(_, label)| Value::String(label.to_string()))
			}
			Field::Custom(f) => f(raw),
		}
	}
}

fn as_f64(v: &Value) -> Option<f64> {
	match v {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse().ok(),
		_ => None,
	}
}

fn as_i64(v: &Value) -> Option<i64> {
	match v {
		Value::Number(n) => n.as_i64(),
		Value::String(s) => s.trim().parse().ok(),
		_ => None,
	}
}

fn as_datetime(v: &Value) -> Option<DateTime<Utc>> {
	match v {
		Value::Number(n) => DateTime::from_timestamp(n.as_i64()?, 0),
		Value::String(s) => DateTime::parse_from_rfc3339(s)
			.map(|dt| dt.with_timezone(&Utc))
			.ok()
			.or_else(|| {
				NaiveDate::parse_from_str(s, "%Y-%m-%d")
					.ok()
					.and_then(|d| d.and_hms_opt(0, 0, 0))
					.map(|dt| dt.and_utc())
			}),
		_ => None,
	}
}

// Model //
//*******//
/// Ordered set of named fields
#[derive(Debug, Clone, Default)]
pub struct Model {
	fields: Vec<(Box<str>, Field)>,
}

impl Model {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn field(mut self, name: impl Into<Box<str>>, field: Field) -> Self {
		self.fields.push((name.into(), field));
		self
	}

	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|(name, _)| name.as_ref())
	}

	/// Present one raw row. Non-object rows yield an empty object.
	pub fn present(&self, row: &Value) -> Value {
		let mut out = Map::with_capacity(self.fields.len());
		for (name, field) in &self.fields {
			let raw = row.get(name.as_ref()).unwrap_or(&Value::Null);
			out.insert(name.to_string(), field.present(raw));
		}
		Value::Object(out)
	}

	pub fn present_all<'a>(&self, rows: impl IntoIterator<Item = &'a Value>) -> Vec<Value> {
		rows.into_iter().map(|row| self.present(row)).collect()
	}
}


// vim: ts=4
