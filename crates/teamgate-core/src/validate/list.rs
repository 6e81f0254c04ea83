//! List request validation and pagination

use teamgate_types::types::PageInfo;

use super::form::Form;
use super::rule::{as_integer, rules};
use super::validator::Validator;

const DEFAULT_PER: u32 = 20;
const MAX_SEARCH_LEN: usize = 200;

/// Validator shared by every search endpoint: `page`, `per`, optional `search`
pub fn list_validator() -> Validator {
	Validator::new()
		.field("page", [rules::required(), rules::integer()])
		.field("per", [rules::required(), rules::integer()])
		.field("search", [rules::max_length(MAX_SEARCH_LEN)])
}

/// Parsed list parameters, normalized to a usable range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
	pub page: u32,
	pub per: u32,
	pub search: Option<String>,
}

fn clamp_u32(v: i64, min: u32, max: u32) -> u32 {
	u32::try_from(v.clamp(i64::from(min), i64::from(max))).unwrap_or(min)
}

impl ListQuery {
	/// Read a form that passed `list_validator`. `page` is at least 1 and
	/// `per` is kept within `1..=max_per`.
	pub fn from_form(form: &Form, max_per: u32) -> Self {
		let max_per = max_per.max(1);
		let page = form.get("page").and_then(as_integer).map_or(1, |p| clamp_u32(p, 1, u32::MAX));
		let per = form
			.get("per")
			.and_then(as_integer)
			.map_or(DEFAULT_PER.min(max_per), |p| clamp_u32(p, 1, max_per));
		let search = form
			.get_str("search")
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map(str::to_string);
		ListQuery { page, per, search }
	}

	pub fn offset(&self) -> usize {
		(self.page as usize - 1).saturating_mul(self.per as usize)
	}
}

/// Cut one page out of an already filtered and ordered list
pub fn paginate<T>(items: Vec<T>, query: &ListQuery) -> (Vec<T>, PageInfo) {
	let total = items.len();
	let page = items.into_iter().skip(query.offset()).take(query.per as usize).collect();
	(page, PageInfo { page: query.page, per: query.per, total })
}


// vim: ts=4
