//! Error type shared by every Teamgate crate.
//!
//! Every error renders as a JSON-API style body:
//! `{"errors": [{"source": {"parameter": ...}, "code": ..., "title": ..., "meta": ...}]}`.
//! Access control failures map to 401, validation failures to 400.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

pub type TgResult<T> = std::result::Result<T, Error>;

// ValidationError //
//*****************//
/// A single failing rule on a single form field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
	pub field: Box<str>,
	pub code: Box<str>,
	pub title: Box<str>,
	pub meta: Option<serde_json::Value>,
}

impl ValidationError {
	pub fn new(
		field: impl Into<Box<str>>,
		code: impl Into<Box<str>>,
		title: impl Into<Box<str>>,
	) -> Self {
		Self { field: field.into(), code: code.into(), title: title.into(), meta: None }
	}

	pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
		self.meta = Some(meta);
		self
	}

	pub fn to_object(&self) -> ErrorObject {
		ErrorObject {
			source: Some(ErrorSource { parameter: self.field.clone() }),
			code: self.code.clone(),
			title: self.title.clone(),
			meta: self.meta.clone(),
		}
	}
}

impl From<ErrorObject> for ValidationError {
	fn from(obj: ErrorObject) -> Self {
		ValidationError {
			field: obj.source.map(|s| s.parameter).unwrap_or_default(),
			code: obj.code,
			title: obj.title,
			meta: obj.meta,
		}
	}
}

// ErrorObject //
//*************//
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSource {
	pub parameter: Box<str>,
}

/// Wire form of one error, as sent to clients.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
	pub source: Option<ErrorSource>,
	pub code: Box<str>,
	pub title: Box<str>,
	pub meta: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
	pub errors: Vec<ErrorObject>,
}

// Error //
//*******//
#[derive(Debug)]
pub enum Error {
	/// No valid credentials were presented
	Unauthenticated,
	/// Authenticated, but lacking a capability, permission or admin status
	Unauthorized { redirect: Option<Box<str>> },
	/// One or more form fields failed their rules
	ValidationFailed(Vec<ValidationError>),
	NotFound,
	ConfigError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
	Json(serde_json::Error),
}

impl Error {
	pub fn unauthorized() -> Self {
		Error::Unauthorized { redirect: None }
	}

	pub fn unauthorized_redirect(redirect: impl Into<Box<str>>) -> Self {
		Error::Unauthorized { redirect: Some(redirect.into()) }
	}

	pub fn status(&self) -> StatusCode {
		match self {
			Error::Unauthenticated | Error::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
			Error::ValidationFailed(_) => StatusCode::BAD_REQUEST,
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::ConfigError(_) | Error::Internal(_) | Error::Io(_) | Error::Json(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	pub fn code(&self) -> &'static str {
		match self {
			Error::Unauthenticated => "NOT_AUTHENTICATED",
			Error::Unauthorized { .. } => "NOT_AUTHORIZED",
			Error::ValidationFailed(_) => "VALIDATION_FAILED",
			Error::NotFound => "NOT_FOUND",
			Error::ConfigError(_) | Error::Internal(_) | Error::Io(_) | Error::Json(_) => {
				"INTERNAL"
			}
		}
	}

	/// Client-facing error objects. Internal details never leave the process.
	pub fn to_objects(&self) -> Vec<ErrorObject> {
		let single = |title: &str, meta: Option<serde_json::Value>| {
			vec![ErrorObject { source: None, code: self.code().into(), title: title.into(), meta }]
		};
		match self {
			Error::ValidationFailed(errors) => errors.iter().map(ValidationError::to_object).collect(),
			Error::Unauthenticated => single("Authentication required", None),
			Error::Unauthorized { redirect } => single(
				"Not authorized",
				redirect.as_ref().map(|r| serde_json::json!({ "redirect": r })),
			),
			Error::NotFound => single("Not found", None),
			_ => single("Internal server error", None),
		}
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::Unauthenticated => write!(f, "not authenticated"),
			Error::Unauthorized { redirect: Some(r) } => write!(f, "not authorized (redirect: {})", r),
			Error::Unauthorized { redirect: None } => write!(f, "not authorized"),
			Error::ValidationFailed(errors) => {
				write!(f, "validation failed:")?;
				for e in errors {
					write!(f, " {}={}", e.field, e.code)?;
				}
				Ok(())
			}
			Error::NotFound => write!(f, "not found"),
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
			Error::Json(err) => write!(f, "json error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Json(err)
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = self.status();
		if status.is_server_error() {
			tracing::error!("Request failed: {}", self);
		}
		(status, Json(ErrorBody { errors: self.to_objects() })).into_response()
	}
}


// vim: ts=4
