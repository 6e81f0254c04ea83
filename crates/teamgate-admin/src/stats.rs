//! Instance statistics for the admin dashboard

use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use crate::prelude::*;
use teamgate_core::extract::Auth;
use teamgate_types::member_adapter::MemberAdapter;
use teamgate_types::types::ApiResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
	pub version: &'static str,
	pub members: usize,
	pub teams: usize,
	pub roles: usize,
	pub plans: usize,
	pub permissions: usize,
	pub capabilities: usize,
}

/// GET /api/admin/stats
pub async fn get_stats(
	State(app): State<App>,
	Auth(auth): Auth,
) -> TgResult<Json<ApiResponse<AdminStats>>> {
	let member_adapter = app.ext::<Arc<dyn MemberAdapter>>()?;
	let stats = AdminStats {
		version: teamgate_core::app::VERSION,
		members: member_adapter.count_members().await?,
		teams: member_adapter.count_teams().await?,
		roles: app.catalog.roles().count(),
		plans: app.catalog.plans().count(),
		permissions: app.catalog.permissions().count(),
		capabilities: app.catalog.capabilities().count(),
	};
	info!(admin = %auth.user_id, "Admin stats requested");

	Ok(Json(ApiResponse::new(stats)))
}


// vim: ts=4
