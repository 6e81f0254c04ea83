//! Caller identity and the public plan catalog

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::controller::{Scope, scoped};
use crate::prelude::*;
use crate::principal::{Capability, PrincipalSummary};
use crate::types::ApiResponse;
use teamgate_core::OptionalAuth;

/// GET /api/me
///
/// `data` is `null` for anonymous callers.
pub async fn get_me(OptionalAuth(auth): OptionalAuth) -> Json<ApiResponse<Option<PrincipalSummary>>> {
	Json(ApiResponse::new(auth.map(|p| p.summary())))
}

#[derive(Debug, Serialize)]
pub struct PlanView {
	pub id: Box<str>,
	pub name: Box<str>,
	pub capabilities: Vec<Capability>,
}

/// GET /api/plans
pub async fn list_plans(State(app): State<App>) -> Json<ApiResponse<Vec<PlanView>>> {
	let plans = app
		.catalog
		.plans()
		.map(|plan| PlanView {
			id: plan.id.clone(),
			name: plan.name.clone(),
			capabilities: plan
				.capabilities
				.iter()
				.filter_map(|id| app.catalog.capability(id).cloned())
				.collect(),
		})
		.collect();
	Json(ApiResponse::new(plans))
}

pub fn routes(app: &App) -> Router<App> {
	scoped(Router::new().route("/api/me", get(get_me)), Scope::Public, app)
}

pub fn plan_routes(app: &App) -> Router<App> {
	scoped(Router::new().route("/api/plans", get(list_plans)), Scope::Public, app)
}

// vim: ts=4
