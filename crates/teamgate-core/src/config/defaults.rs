//! Framework defaults registered by the core crate
//!
//! Apps override any of these from their own config file; see
//! `ConfigRegistry::freeze`.

use serde_json::json;

use super::ConfigRegistry;
use crate::prelude::*;

pub const DEV_JWT_SECRET: &str = "teamgate-dev-secret-change-me";

/// Register all core defaults
pub fn register_defaults(registry: &mut ConfigRegistry) -> TgResult<()> {
	registry.register(
		"server",
		json!({
			"listen": "127.0.0.1:3000",
			"cors": false,
		}),
	)?;

	registry.register(
		"auth",
		json!({
			"jwt_secret": DEV_JWT_SECRET,
			"token_expire_hours": 8,
		}),
	)?;

	registry.register(
		"access",
		json!({
			"subscription_redirect": "/subscription",
		}),
	)?;

	registry.register(
		"pagination",
		json!({
			"default_per": 20,
			"max_per": 100,
		}),
	)?;

	// Feature crates add their own flags here through the app config
	registry.register(
		"features",
		json!({
			"teams": true,
			"subscriptions": true,
			"admin": true,
		}),
	)?;

	registry.register(
		"catalog",
		json!({
			"permissions": [
				{ "id": "view_team", "name": "View team" },
				{ "id": "manage_team", "name": "Manage team" },
				{ "id": "invite_member", "name": "Invite members" },
				{ "id": "manage_billing", "name": "Manage billing" },
			],
			"capabilities": [
				{ "id": "teams", "name": "Teams" },
				{ "id": "exports", "name": "Data exports" },
				{ "id": "api_access", "name": "API access" },
			],
			"roles": [
				{
					"id": "owner",
					"name": "Owner",
					"description": "Full control over the team and its billing",
					"permissions": ["view_team", "manage_team", "invite_member", "manage_billing"],
				},
				{
					"id": "manager",
					"name": "Manager",
					"description": "Manages members of the team",
					"permissions": ["view_team", "manage_team", "invite_member"],
				},
				{
					"id": "member",
					"name": "Member",
					"description": "Regular team member",
					"permissions": ["view_team"],
				},
			],
			"plans": [
				{ "id": "free", "name": "Free", "capabilities": [] },
				{ "id": "starter", "name": "Starter", "capabilities": ["teams"] },
				{ "id": "pro", "name": "Pro", "capabilities": ["teams", "exports", "api_access"] },
			],
		}),
	)?;

	Ok(())
}


// vim: ts=4
