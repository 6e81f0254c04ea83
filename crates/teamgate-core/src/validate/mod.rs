//! Request validation.
//!
//! A `Validator` maps field names to ordered rule lists. Every rule of every
//! field is evaluated and all failures are reported together; handlers call
//! `validate` and return early with `Error::ValidationFailed`.

pub mod form;
pub mod list;
pub mod rule;
pub mod validator;

pub use form::Form;
pub use list::{ListQuery, list_validator, paginate};
pub use rule::{Predicate, Rule, invert, rules};
pub use validator::{Validates, Validator, validate};

// vim: ts=4
