//! Team members: search listing and invitations.
//!
//! Both routes run the full pipeline: authentication, the subscription and
//! permission gates, then form validation before the handler touches data.

use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	middleware,
	routing::{get, post},
};
use serde_json::Value;
use std::sync::Arc;

use crate::controller::{Scope, scoped};
use crate::gate::{Gate, gates};
use crate::member_adapter::{CreateMemberData, ListMembersOptions, Member, MemberAdapter, MemberStatus};
use crate::model::{Field, Model};
use crate::prelude::*;
use crate::types::ApiResponse;
use crate::validate::{Form, ListQuery, Validator, list_validator, paginate, rules, validate};
use teamgate_core::{Auth, JsonForm, QueryForm};

const MAX_NAME_LEN: usize = 100;
const DEFAULT_MAX_PER: u32 = 100;

/// Optional filters accepted by the member search next to the list fields
fn filter_validator(app: &App) -> Validator {
	Validator::new().field("role", [rules::in_list(&app.catalog.role_ids())])
}

fn invite_validator(app: &App) -> Validator {
	Validator::new()
		.field("email", [rules::required(), rules::email()])
		.field("role", [rules::required(), rules::in_list(&app.catalog.role_ids())])
		.field("name", [rules::max_length(MAX_NAME_LEN)])
}

/// Presentation of a member row
fn member_model(app: &App) -> Model {
	Model::new()
		.field("memberId", Field::Text)
		.field("email", Field::Text)
		.field("name", Field::Text)
		.field("role", Field::enumeration(app.catalog.roles().map(|r| (&*r.id, &*r.name))))
		.field("status", Field::enumeration([("active", "Active"), ("invited", "Invited")]))
		.field("createdAt", Field::date())
}

fn present(model: &Model, members: &[Member]) -> TgResult<Vec<Value>> {
	let rows = members.iter().map(serde_json::to_value).collect::<Result<Vec<_>, _>>()?;
	Ok(model.present_all(&rows))
}

/// Team of the caller; a member route makes no sense without one
fn team_of(principal: &Principal) -> TgResult<&str> {
	principal.team_id.as_deref().ok_or_else(|| {
		warn!(subject = %principal.user_id, "Team route called without a team");
		Error::unauthorized()
	})
}

/// Validated string field
fn field_str<'a>(form: &'a Form, field: &str) -> TgResult<&'a str> {
	form.get_str(field).ok_or_else(|| {
		Error::ValidationFailed(vec![ValidationError::new(field, "EMPTY", "Required field")])
	})
}

/// GET /api/members?page=&per=&search=&role=
pub async fn list_members(
	State(app): State<App>,
	Auth(auth): Auth,
	QueryForm(form): QueryForm,
) -> TgResult<Json<ApiResponse<Vec<Value>>>> {
	validate(&form, &[list_validator(), filter_validator(&app)])?;

	let team_id = team_of(&auth)?;
	let query = ListQuery::from_form(&form, app.config.get_or("pagination", "max_per", DEFAULT_MAX_PER));
	let role = form.get_str("role").map(str::trim).filter(|r| !r.is_empty());
	let opts = ListMembersOptions { search: query.search.as_deref(), role };

	let member_adapter = app.ext::<Arc<dyn MemberAdapter>>()?;
	let members = member_adapter.list_members(team_id, &opts).await?;
	let (page, info) = paginate(members, &query);
	debug!(team = %team_id, total = info.total, "Listed members");

	let data = present(&member_model(&app), &page)?;
	Ok(Json(ApiResponse::new(data).with_page(info)))
}

/// POST /api/members/invite
pub async fn invite_member(
	State(app): State<App>,
	Auth(auth): Auth,
	JsonForm(form): JsonForm,
) -> TgResult<(StatusCode, Json<ApiResponse<Value>>)> {
	validate(&form, &invite_validator(&app))?;

	let team_id = team_of(&auth)?;
	let member_adapter = app.ext::<Arc<dyn MemberAdapter>>()?;
	let member = member_adapter
		.create_member(CreateMemberData {
			team_id,
			email: field_str(&form, "email")?,
			name: form.get_str("name").map(str::trim).filter(|n| !n.is_empty()),
			role: field_str(&form, "role")?,
			status: MemberStatus::Invited,
		})
		.await?;
	info!(subject = %auth.user_id, team = %team_id, member = %member.member_id, "Member invited");

	let data = member_model(&app).present(&serde_json::to_value(&member)?);
	Ok((StatusCode::CREATED, Json(ApiResponse::new(data))))
}

pub fn routes(app: &App) -> Router<App> {
	let router = Router::new()
		.route(
			"/api/members",
			get(list_members).route_layer(middleware::from_fn_with_state(
				app.clone(),
				gates(vec![Gate::subscription(&["teams"]), Gate::permissions(&["view_team"])]),
			)),
		)
		.route(
			"/api/members/invite",
			post(invite_member).route_layer(middleware::from_fn_with_state(
				app.clone(),
				gates(vec![
					Gate::subscription(&["teams"]),
					Gate::permissions(&["manage_team", "invite_member"]),
				]),
			)),
		);
	scoped(router, Scope::Private, app)
}


// vim: ts=4
