//! Controller gates: admin, subscription capability and role permission checks.
//!
//! A gate list is evaluated in declared order and stops at the first
//! failure. The axum adapters below wrap a gate list into a route layer.

use axum::{
	extract::{Request, State},
	middleware::Next,
	response::Response,
};
use std::{future::Future, pin::Pin, sync::Arc};

use crate::access::{has_capabilities, has_permissions, missing_permissions};
use crate::config::Config;
use crate::extract::Auth;
use crate::prelude::*;

/// Future returned by the gate middleware factories
pub type GateOutput = Pin<Box<dyn Future<Output = Result<Response, Error>> + Send>>;

const DEFAULT_SUBSCRIPTION_REDIRECT: &str = "/subscription";

#[derive(Debug, Clone)]
pub struct GateOpts {
	/// Where a client should send a user whose plan lacks a capability
	pub subscription_redirect: Box<str>,
}

impl GateOpts {
	pub fn from_config(config: &Config) -> Self {
		GateOpts {
			subscription_redirect: config
				.get_str("access", "subscription_redirect")
				.unwrap_or(DEFAULT_SUBSCRIPTION_REDIRECT)
				.into(),
		}
	}
}

impl Default for GateOpts {
	fn default() -> Self {
		GateOpts { subscription_redirect: DEFAULT_SUBSCRIPTION_REDIRECT.into() }
	}
}

// Gate //
//******//
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
	Admin,
	Subscription(Box<[Box<str>]>),
	Permissions(Box<[Box<str>]>),
}

fn to_boxed(ids: &[&str]) -> Box<[Box<str>]> {
	ids.iter().map(|id| Box::from(*id)).collect()
}

fn as_strs(ids: &[Box<str>]) -> Vec<&str> {
	ids.iter().map(AsRef::as_ref).collect()
}

impl Gate {
	pub fn subscription(capabilities: &[&str]) -> Self {
		Gate::Subscription(to_boxed(capabilities))
	}

	pub fn permissions(permissions: &[&str]) -> Self {
		Gate::Permissions(to_boxed(permissions))
	}

	pub fn check(&self, principal: &Principal, opts: &GateOpts) -> TgResult<()> {
		match self {
			Gate::Admin => {
				if !principal.is_admin() {
					warn!(
						subject = %principal.user_id,
						account_type = ?principal.account_type,
						"Admin access denied"
					);
					return Err(Error::unauthorized());
				}
			}
			Gate::Subscription(required) => {
				let required = as_strs(required);
				if !has_capabilities(principal.subscription.as_deref(), &required) {
					warn!(
						subject = %principal.user_id,
						plan = ?principal.subscription.as_ref().map(|s| &s.plan),
						required = ?required,
						"Subscription does not grant required capabilities"
					);
					return Err(Error::unauthorized_redirect(opts.subscription_redirect.clone()));
				}
			}
			Gate::Permissions(required) => {
				let required = as_strs(required);
				let role = principal.role.as_deref();
				if !has_permissions(role, &required) {
					warn!(
						subject = %principal.user_id,
						role = ?role.map(|r| &r.id),
						missing = ?missing_permissions(role, &required),
						"Role lacks required permissions"
					);
					return Err(Error::unauthorized());
				}
			}
		}
		Ok(())
	}
}

/// Evaluate gates in order, stopping at the first failure
pub fn check_gates(gates: &[Gate], principal: &Principal, opts: &GateOpts) -> TgResult<()> {
	gates.iter().try_for_each(|gate| gate.check(principal, opts))
}

// Middleware //
//************//
/// Middleware factory for an ordered gate list.
///
/// Must run inside `auth::require_auth`; without a principal the request
/// is rejected as unauthenticated.
pub fn gates(list: Vec<Gate>) -> impl Fn(State<App>, Auth, Request, Next) -> GateOutput + Clone {
	let list: Arc<[Gate]> = list.into();
	move |state, auth, req, next| Box::pin(run_gates(state, auth, req, next, list.clone()))
}

pub fn require_subscription(
	capabilities: &[&str],
) -> impl Fn(State<App>, Auth, Request, Next) -> GateOutput + Clone {
	gates(vec![Gate::subscription(capabilities)])
}

pub fn require_permissions(
	permissions: &[&str],
) -> impl Fn(State<App>, Auth, Request, Next) -> GateOutput + Clone {
	gates(vec![Gate::permissions(permissions)])
}

async fn run_gates(
	State(app): State<App>,
	Auth(principal): Auth,
	req: Request,
	next: Next,
	list: Arc<[Gate]>,
) -> Result<Response, Error> {
	check_gates(&list, &principal, &app.gate_opts)?;
	Ok(next.run(req).await)
}

/// Middleware rejecting every non-admin account
pub async fn require_admin(Auth(principal): Auth, req: Request, next: Next) -> Result<Response, Error> {
	Gate::Admin.check(&principal, &GateOpts::default())?;
	Ok(next.run(req).await)
}


// vim: ts=4
