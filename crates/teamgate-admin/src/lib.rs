//! Admin API handlers for instance administration

pub mod stats;

mod prelude;

use axum::{Router, routing::get};

use teamgate_core::controller::{Scope, scoped};
use teamgate_core::prelude::App;

/// Admin routes; every route requires an admin account
pub fn routes(app: &App) -> Router<App> {
	let router = Router::new().route("/api/admin/stats", get(stats::get_stats));
	scoped(router, Scope::Admin, app)
}

// vim: ts=4
