//! Router assembly. Feature routers are merged according to `features.*`.

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::prelude::*;
use crate::{account, admin, members};

async fn not_found() -> Error {
	Error::NotFound
}

pub fn init(app: &App) -> Router {
	let mut api = Router::new().merge(account::routes(app));

	if app.config.is_feature_enabled("subscriptions") {
		api = api.merge(account::plan_routes(app));
	}
	if app.config.is_feature_enabled("teams") {
		api = api.merge(members::routes(app));
	}
	if app.config.is_feature_enabled("admin") {
		api = api.merge(admin::routes(app));
	}

	let router = api.fallback(not_found).with_state(app.clone()).layer(TraceLayer::new_for_http());

	if app.config.get_bool("server", "cors").unwrap_or(false) {
		debug!("CORS enabled");
		router.layer(CorsLayer::permissive())
	} else {
		router
	}
}

// vim: ts=4
