//! Controller scopes.
//!
//! Every feature router is mounted under one scope, which decides how the
//! caller is authenticated before any per-route gate runs:
//!
//! - `Public`: optional auth, anonymous callers pass
//! - `Private`: a valid token is required
//! - `Admin`: a valid token of an admin account is required

use axum::{Router, middleware};

use crate::auth::{optional_auth, require_auth};
use crate::gate::require_admin;
use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
	Public,
	Private,
	Admin,
}

/// Wrap every route of `router` in the authentication layers of `scope`.
///
/// Layers are route layers, so unmatched paths still fall through to 404.
pub fn scoped(router: Router<App>, scope: Scope, app: &App) -> Router<App> {
	match scope {
		Scope::Public => router.route_layer(middleware::from_fn_with_state(app.clone(), optional_auth)),
		Scope::Private => router.route_layer(middleware::from_fn_with_state(app.clone(), require_auth)),
		Scope::Admin => router
			.route_layer(middleware::from_fn(require_admin))
			.route_layer(middleware::from_fn_with_state(app.clone(), require_auth)),
	}
}


// vim: ts=4
