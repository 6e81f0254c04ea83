//! Common types used throughout the Teamgate platform.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::time::SystemTime;

// Timestamp //
//***********//
/// Unix timestamp in seconds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Timestamp {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(i64::try_from(res.as_secs()).unwrap_or(i64::MAX))
	}

	pub fn add_seconds(&self, seconds: i64) -> Timestamp {
		Timestamp(self.0.saturating_add(seconds))
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}

// ApiResponse //
//*************//
/// Pagination info attached to list responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
	pub page: u32,
	pub per: u32,
	pub total: usize,
}

/// Success envelope: `{"data": ..., "page": ...}`
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
	pub data: T,
	pub page: Option<PageInfo>,
}

impl<T> ApiResponse<T> {
	pub fn new(data: T) -> Self {
		Self { data, page: None }
	}

	pub fn with_page(mut self, page: PageInfo) -> Self {
		self.page = Some(page);
		self
	}
}


// vim: ts=4
