//! Custom extractors for Teamgate-specific data

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use std::collections::BTreeMap;

use crate::prelude::*;
use crate::validate::Form;

// Auth //
//******//
/// Authenticated principal, inserted into request extensions by `auth::require_auth`
#[derive(Debug, Clone)]
pub struct Auth(pub Principal);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(auth) = parts.extensions.get::<Auth>().cloned() {
			Ok(auth)
		} else {
			Err(Error::Unauthenticated)
		}
	}
}

// OptionalAuth //
//**************//
/// Optional auth extractor that doesn't fail if auth is missing
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<Principal>);

impl<S> FromRequestParts<S> for OptionalAuth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let auth = parts.extensions.get::<Auth>().cloned().map(|a| a.0);
		Ok(OptionalAuth(auth))
	}
}

// QueryForm //
//***********//
/// Query string as an unvalidated form. Repeated keys keep the last value.
#[derive(Debug, Clone)]
pub struct QueryForm(pub Form);

impl<S> FromRequestParts<S> for QueryForm
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let Query(map) = Query::<BTreeMap<String, String>>::try_from_uri(&parts.uri).map_err(|e| {
			Error::ValidationFailed(vec![ValidationError::new(
				"query",
				"INVALID_QUERY",
				format!("Malformed query string: {}", e),
			)])
		})?;
		Ok(QueryForm(Form::from(map)))
	}
}

// JsonForm //
//**********//
/// JSON request body as an unvalidated form
#[derive(Debug, Clone)]
pub struct JsonForm(pub Form);

impl<S> FromRequest<S> for JsonForm
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let Json(value) = Json::<serde_json::Value>::from_request(req, state).await.map_err(|e| {
			Error::ValidationFailed(vec![ValidationError::new(
				"body",
				"INVALID_BODY",
				format!("Malformed JSON body: {}", e.body_text()),
			)])
		})?;
		Ok(JsonForm(Form::from_json(value)?))
	}
}


// vim: ts=4
