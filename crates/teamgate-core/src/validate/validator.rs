//! Validators and the `validate` entry point

use super::form::Form;
use super::rule::Rule;
use crate::prelude::*;

// Validator //
//***********//
/// Ordered field -> rules mapping
#[derive(Debug, Clone, Default)]
pub struct Validator {
	fields: Vec<(Box<str>, Vec<Rule>)>,
}

impl Validator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add rules for a field; declaring a field twice appends to its rules
	pub fn field(mut self, name: &str, rules: impl IntoIterator<Item = Rule>) -> Self {
		match self.fields.iter_mut().find(|(n, _)| &**n == name) {
			Some((_, existing)) => existing.extend(rules),
			None => self.fields.push((name.into(), rules.into_iter().collect())),
		}
		self
	}

	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|(n, _)| n.as_ref())
	}
}

// Validates //
//***********//
/// Anything that checks a form: a validator or a collection of them
pub trait Validates {
	/// Every failing rule, optionally restricted to one field
	fn rule_errors(&self, form: &Form, field: Option<&str>) -> Vec<ValidationError>;

	/// Rule errors plus `api_errors` (errors the server already reported for
	/// this form), grouped by field in first-seen order.
	fn errors(
		&self,
		form: &Form,
		api_errors: &[ValidationError],
		field: Option<&str>,
	) -> Vec<ValidationError> {
		let mut errors = self.rule_errors(form, field);
		errors.extend(
			api_errors.iter().filter(|e| field.is_none_or(|f| &*e.field == f)).cloned(),
		);
		group_by_field(errors)
	}

	fn valid(&self, form: &Form) -> bool {
		self.rule_errors(form, None).is_empty()
	}
}

impl Validates for Validator {
	fn rule_errors(&self, form: &Form, field: Option<&str>) -> Vec<ValidationError> {
		self.fields
			.iter()
			.filter(|(name, _)| field.is_none_or(|f| &**name == f))
			.flat_map(|(name, rules)| {
				let value = form.get(name);
				rules.iter().filter(move |rule| rule.fails(value)).map(move |rule| rule.error(name))
			})
			.collect()
	}
}

impl<V: Validates> Validates for [V] {
	fn rule_errors(&self, form: &Form, field: Option<&str>) -> Vec<ValidationError> {
		self.iter().flat_map(|v| v.rule_errors(form, field)).collect()
	}
}

impl<V: Validates, const N: usize> Validates for [V; N] {
	fn rule_errors(&self, form: &Form, field: Option<&str>) -> Vec<ValidationError> {
		self.as_slice().rule_errors(form, field)
	}
}

impl<V: Validates> Validates for Vec<V> {
	fn rule_errors(&self, form: &Form, field: Option<&str>) -> Vec<ValidationError> {
		self.as_slice().rule_errors(form, field)
	}
}

impl<V: Validates + ?Sized> Validates for &V {
	fn rule_errors(&self, form: &Form, field: Option<&str>) -> Vec<ValidationError> {
		(**self).rule_errors(form, field)
	}
}

/// Stable grouping: errors of one field end up adjacent
fn group_by_field(errors: Vec<ValidationError>) -> Vec<ValidationError> {
	let mut order: Vec<Box<str>> = Vec::new();
	for e in &errors {
		if !order.contains(&e.field) {
			order.push(e.field.clone());
		}
	}
	let mut grouped = Vec::with_capacity(errors.len());
	for field in order {
		grouped.extend(errors.iter().filter(|e| e.field == field).cloned());
	}
	grouped
}

/// Check a form against one or more validators.
///
/// All fields are checked and every failure is reported together.
pub fn validate<V: Validates + ?Sized>(form: &Form, validators: &V) -> TgResult<()> {
	let errors = validators.errors(form, &[], None);
	if errors.is_empty() { Ok(()) } else { Err(Error::ValidationFailed(errors)) }
}


// vim: ts=4
