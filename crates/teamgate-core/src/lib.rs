//! Core infrastructure for the Teamgate platform.
//!
//! Everything a request touches between the socket and a feature handler
//! lives here: layered configuration and the role / plan catalogs loaded
//! from it, JWT authentication, the access control gates, and the request
//! validation pipeline.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod access;
pub mod app;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod extensions;
pub mod extract;
pub mod gate;
pub mod prelude;
pub mod validate;

// Re-export commonly used types
pub use app::{App, AppState};
pub use controller::Scope;
pub use extract::{Auth, JsonForm, OptionalAuth, QueryForm};
pub use gate::Gate;

pub fn register_defaults(registry: &mut config::ConfigRegistry) -> teamgate_types::error::TgResult<()> {
	config::defaults::register_defaults(registry)
}

// vim: ts=4
