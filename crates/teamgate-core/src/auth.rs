//! JWT authentication.
//!
//! Access tokens are HS256 JWTs carrying the user id, account type and the
//! ids of the caller's team role and subscription plan. The middleware
//! resolves those ids against the catalog into a `Principal`; ids the
//! catalog does not know resolve to nothing.

use axum::{
	extract::{Request, State},
	http::{HeaderMap, header},
	middleware::Next,
	response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::config::defaults::DEV_JWT_SECRET;
use crate::extract::Auth;
use crate::prelude::*;

const DEFAULT_TOKEN_EXPIRE: i64 = 8; /* hours */

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AccessClaims {
	pub sub: Box<str>,
	pub acct: AccountType,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub team: Option<Box<str>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub role: Option<Box<str>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub plan: Option<Box<str>>,
	/// Subscription id
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sid: Option<Box<str>>,
	pub exp: i64,
}

impl AccessClaims {
	pub fn new(user_id: impl Into<Box<str>>, account_type: AccountType) -> Self {
		AccessClaims {
			sub: user_id.into(),
			acct: account_type,
			team: None,
			role: None,
			plan: None,
			sid: None,
			exp: 0,
		}
	}

	pub fn team(mut self, team_id: impl Into<Box<str>>, role: impl Into<Box<str>>) -> Self {
		self.team = Some(team_id.into());
		self.role = Some(role.into());
		self
	}

	pub fn plan(mut self, plan: impl Into<Box<str>>, subscription_id: impl Into<Box<str>>) -> Self {
		self.plan = Some(plan.into());
		self.sid = Some(subscription_id.into());
		self
	}
}

// AuthKeys //
//**********//
pub struct AuthKeys {
	encoding: EncodingKey,
	decoding: DecodingKey,
	expire_hours: i64,
}

impl AuthKeys {
	pub fn new(secret: &[u8], expire_hours: i64) -> Self {
		AuthKeys {
			encoding: EncodingKey::from_secret(secret),
			decoding: DecodingKey::from_secret(secret),
			expire_hours,
		}
	}

	pub fn from_config(config: &Config) -> TgResult<Self> {
		let secret: String = config.require("auth", "jwt_secret")?;
		if secret.is_empty() {
			return Err(Error::ConfigError("auth.jwt_secret must not be empty".into()));
		}
		if secret == DEV_JWT_SECRET {
			warn!("Using the built-in development JWT secret; set auth.jwt_secret in production");
		}
		let expire_hours = config.get_or("auth", "token_expire_hours", DEFAULT_TOKEN_EXPIRE);
		Ok(AuthKeys::new(secret.as_bytes(), expire_hours))
	}

	/// Sign claims; `exp` is set from the configured token lifetime
	pub fn issue(&self, mut claims: AccessClaims) -> TgResult<Box<str>> {
		claims.exp = Timestamp::now().add_seconds(self.expire_hours * 3600).0;
		let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
			.map_err(|e| Error::Internal(format!("Cannot sign token: {}", e)))?;
		Ok(token.into())
	}

	pub fn validate(&self, token: &str) -> TgResult<AccessClaims> {
		let token_data = jsonwebtoken::decode::<AccessClaims>(
			token,
			&self.decoding,
			&Validation::new(Algorithm::HS256),
		)
		.map_err(|e| {
			debug!("Token rejected: {}", e);
			Error::Unauthenticated
		})?;
		Ok(token_data.claims)
	}
}

/// Resolve token claims into a principal using the catalog
pub fn resolve_principal(catalog: &Catalog, claims: &AccessClaims) -> Principal {
	let mut principal = Principal::new(claims.sub.clone(), claims.acct);
	principal.team_id = claims.team.clone();
	principal.role = claims.role.as_deref().and_then(|id| catalog.role(id));
	principal.subscription = claims.plan.as_deref().and_then(|plan| {
		let sid = claims.sid.clone().unwrap_or_else(|| format!("{}:{}", claims.sub, plan).into());
		catalog.subscription(&sid, plan).map(Arc::new)
	});
	principal
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
	headers
		.get(header::AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
		.map(str::trim)
}

pub async fn require_auth(State(app): State<App>, mut req: Request, next: Next) -> TgResult<Response> {
	let token = bearer_token(req.headers()).ok_or(Error::Unauthenticated)?;
	let claims = app.auth_keys.validate(token)?;
	let principal = resolve_principal(&app.catalog, &claims);

	req.extensions_mut().insert(Auth(principal));

	Ok(next.run(req).await)
}

/// Like `require_auth`, but anonymous or invalid credentials pass through without a principal
pub async fn optional_auth(State(app): State<App>, mut req: Request, next: Next) -> TgResult<Response> {
	if let Some(token) = bearer_token(req.headers()) {
		if let Ok(claims) = app.auth_keys.validate(token) {
			let principal = resolve_principal(&app.catalog, &claims);
			req.extensions_mut().insert(Auth(principal));
		}
	}

	Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::app::AppState;
	use crate::extract::OptionalAuth;
	use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
	use http_body_util::BodyExt;
	use tower::ServiceExt;

	fn app() -> App {
		Arc::new(AppState::from_overrides(serde_json::json!({ "auth": { "jwt_secret": "test" } })).unwrap())
	}

	async fn call(router: Router, token: Option<&str>) -> (StatusCode, String) {
		let mut req = axum::http::Request::builder().uri("/me");
		if let Some(token) = token {
			req = req.header("Authorization", format!("Bearer {}", token));
		}
		let res = router.oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
		let status = res.status();
		let body = res.into_body().collect().await.unwrap().to_bytes();
		(status, String::from_utf8_lossy(&body).into_owned())
	}

	fn protected(app: &App) -> Router {
		Router::new()
			.route(
				"/me",
				get(|Auth(p): Auth| async move {
					format!(
						"{} {} {}",
						p.user_id,
						p.role.map_or("-".into(), |r| r.id.clone()),
						p.subscription.map_or("-".into(), |s| s.plan.clone())
					)
				}),
			)
			.route_layer(middleware::from_fn_with_state(app.clone(), require_auth))
			.with_state(app.clone())
	}

	#[test]
	fn test_issue_and_validate() {
		let app = app();
		let token = app
			.auth_keys
			.issue(AccessClaims::new("u1", AccountType::User).team("t1", "owner").plan("pro", "sub_9"))
			.unwrap();
		let claims = app.auth_keys.validate(&token).unwrap();
		assert_eq!(claims.sub.as_ref(), "u1");
		assert_eq!(claims.sid.as_deref(), Some("sub_9"));
		assert!(claims.exp > Timestamp::now().0);
	}

	#[test]
	fn test_token_signed_with_other_secret_rejected() {
		let other = AuthKeys::new(b"other", 8);
		let token = other.issue(AccessClaims::new("u1", AccountType::Admin)).unwrap();
		assert!(matches!(app().auth_keys.validate(&token), Err(Error::Unauthenticated)));
	}

	#[test]
	fn test_expired_token_rejected() {
		let keys = AuthKeys::new(b"test", -2);
		let token = keys.issue(AccessClaims::new("u1", AccountType::User)).unwrap();
		assert!(matches!(keys.validate(&token), Err(Error::Unauthenticated)));
	}

	#[test]
	fn test_resolve_principal_fails_closed_on_unknown_ids() {
		let app = app();
		let claims = AccessClaims::new("u1", AccountType::User).team("t1", "overlord").plan("platinum", "s");
		let principal = resolve_principal(&app.catalog, &claims);
		assert_eq!(principal.team_id.as_deref(), Some("t1"));
		assert!(principal.role.is_none());
		assert!(principal.subscription.is_none());
	}

	#[test]
	fn test_resolve_principal_known_ids() {
		let app = app();
		let claims = AccessClaims::new("u1", AccountType::User).team("t1", "member").plan("starter", "s1");
		let principal = resolve_principal(&app.catalog, &claims);
		assert!(principal.role.unwrap().has_permission("view_team"));
		let sub = principal.subscription.unwrap();
		assert_eq!(sub.id.as_ref(), "s1");
		assert!(sub.capabilities.contains("teams"));
	}

	#[tokio::test]
	async fn test_require_auth_middleware() {
		let app = app();
		let token = app
			.auth_keys
			.issue(AccessClaims::new("u1", AccountType::User).team("t1", "member"))
			.unwrap();

		let (status, body) = call(protected(&app), Some(&token)).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, "u1 member -");

		let (status, body) = call(protected(&app), None).await;
		assert_eq!(status, StatusCode::UNAUTHORIZED);
		assert!(body.contains("NOT_AUTHENTICATED"));

		let (status, _) = call(protected(&app), Some("garbage")).await;
		assert_eq!(status, StatusCode::UNAUTHORIZED);
	}

	#[tokio::test]
	async fn test_optional_auth_middleware() {
		let app = app();
		let router = Router::new()
			.route(
				"/me",
				get(|OptionalAuth(p): OptionalAuth| async move {
					p.map_or_else(|| "anonymous".to_string(), |p| p.user_id.to_string())
				}),
			)
			.route_layer(middleware::from_fn_with_state(app.clone(), optional_auth))
			.with_state(app.clone());

		let (status, body) = call(router.clone(), None).await;
		assert_eq!((status, body.as_str()), (StatusCode::OK, "anonymous"));

		let (status, body) = call(router.clone(), Some("garbage")).await;
		assert_eq!((status, body.as_str()), (StatusCode::OK, "anonymous"));

		let token = app.auth_keys.issue(AccessClaims::new("u7", AccountType::User)).unwrap();
		let (_, body) = call(router, Some(&token)).await;
		assert_eq!(body, "u7");
	}
}

// vim: ts=4
