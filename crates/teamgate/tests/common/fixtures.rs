use axum::{
	Router,
	body::Body,
	http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use teamgate::auth::AccessClaims;
use teamgate::member_adapter::{Member, MemberStatus};
use teamgate::principal::AccountType;
use teamgate::types::Timestamp;
use teamgate::{App, AppBuilder};
use teamgate_member_adapter_memory::MemberAdapterMemory;

pub const TEAM: &str = "team_1";
pub const OTHER_TEAM: &str = "team_2";

fn member(id: &str, team: &str, email: &str, name: &str, role: &str, created_at: i64) -> Member {
	Member {
		member_id: id.into(),
		team_id: team.into(),
		email: email.into(),
		name: Some(name.into()),
		role: role.into(),
		status: MemberStatus::Active,
		created_at: Timestamp(created_at),
	}
}

/// Five members on `TEAM`, one on `OTHER_TEAM`
pub fn seed_members() -> Vec<Member> {
	vec![
		member("m1", TEAM, "olga@example.com", "Olga Owner", "owner", 1_700_000_000),
		member("m2", TEAM, "max@example.com", "Max Manager", "manager", 1_700_086_400),
		member("m3", TEAM, "ann@example.com", "Ann Smith", "member", 1_700_172_800),
		member("m4", TEAM, "bob@example.com", "Bob Smith", "member", 1_700_259_200),
		member("m5", TEAM, "cy@example.com", "Cy Jones", "member", 1_700_345_600),
		member("m6", OTHER_TEAM, "zed@example.com", "Zed Else", "owner", 1_700_000_000),
	]
}

pub struct TestApp {
	pub app: App,
	pub router: Router,
}

/// App with the default catalog and `overrides` on top of a test secret
pub async fn test_app_with(overrides: Value) -> TestApp {
	let mut config = json!({ "auth": { "jwt_secret": "integration-test-secret" } });
	teamgate::config::merge(&mut config, overrides);

	let mut builder = AppBuilder::new();
	builder
		.config_overrides(config)
		.member_adapter(Arc::new(MemberAdapterMemory::with_members(seed_members())));
	let (app, router) = builder.build().await.unwrap();
	TestApp { app, router }
}

pub async fn test_app() -> TestApp {
	test_app_with(json!({})).await
}

// Claims //
//********//
pub fn team_user(role: &str, plan: &str) -> AccessClaims {
	AccessClaims::new(format!("user_{}", role), AccountType::User).team(TEAM, role).plan(plan, "sub_1")
}

pub fn admin() -> AccessClaims {
	AccessClaims::new("admin_1", AccountType::Admin)
}

impl TestApp {
	pub fn token(&self, claims: AccessClaims) -> String {
		self.app.auth_keys.issue(claims).unwrap().into()
	}

	/// Send a request, returning the status and the JSON body (`null` when empty)
	pub async fn call(
		&self,
		method: Method,
		uri: &str,
		claims: Option<AccessClaims>,
		body: Option<Value>,
	) -> (StatusCode, Value) {
		let mut req = Request::builder().method(method).uri(uri);
		if let Some(claims) = claims {
			req = req.header("Authorization", format!("Bearer {}", self.token(claims)));
		}
		let req = match body {
			Some(body) => req
				.header("content-type", "application/json")
				.body(Body::from(body.to_string()))
				.unwrap(),
			None => req.body(Body::empty()).unwrap(),
		};

		let res = self.router.clone().oneshot(req).await.unwrap();
		let status = res.status();
		let bytes = res.into_body().collect().await.unwrap().to_bytes();
		(status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
	}

	pub async fn get(&self, uri: &str, claims: Option<AccessClaims>) -> (StatusCode, Value) {
		self.call(Method::GET, uri, claims, None).await
	}

	pub async fn post(&self, uri: &str, claims: Option<AccessClaims>, body: Value) -> (StatusCode, Value) {
		self.call(Method::POST, uri, claims, Some(body)).await
	}
}

/// `(field, code)` pairs of an error body
pub fn error_codes(body: &Value) -> Vec<(String, String)> {
	body["errors"]
		.as_array()
		.map(|errors| {
			errors
				.iter()
				.map(|e| {
					(
						e["source"]["parameter"].as_str().unwrap_or_default().to_string(),
						e["code"].as_str().unwrap_or_default().to_string(),
					)
				})
				.collect()
		})
		.unwrap_or_default()
}

// vim: ts=4
