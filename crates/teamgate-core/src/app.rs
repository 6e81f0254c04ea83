//! App state type

use std::sync::Arc;

use crate::auth::AuthKeys;
use crate::catalog::Catalog;
use crate::config::{Config, ConfigRegistry};
use crate::extensions::Extensions;
use crate::gate::GateOpts;
use crate::prelude::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Process-wide, read-only state shared by every request
pub struct AppState {
	pub config: Arc<Config>,
	pub catalog: Arc<Catalog>,
	pub auth_keys: AuthKeys,
	pub gate_opts: GateOpts,
	pub extensions: Extensions,
}

impl AppState {
	/// Build the state from a frozen config: loads the catalog and the JWT keys
	pub fn new(config: Config, extensions: Extensions) -> TgResult<AppState> {
		let catalog = Catalog::from_config(&config)?;
		let auth_keys = AuthKeys::from_config(&config)?;
		let gate_opts = GateOpts::from_config(&config);
		Ok(AppState {
			config: Arc::new(config),
			catalog: Arc::new(catalog),
			auth_keys,
			gate_opts,
			extensions,
		})
	}

	/// Core defaults with app-level overrides on top, no extensions
	pub fn from_overrides(overrides: serde_json::Value) -> TgResult<AppState> {
		let mut registry = ConfigRegistry::new();
		crate::register_defaults(&mut registry)?;
		AppState::new(registry.freeze(overrides)?, Extensions::new())
	}

	/// Registered extension of type `T`
	pub fn ext<T: Send + Sync + 'static>(&self) -> TgResult<&T> {
		self.extensions.require::<T>()
	}
}

impl std::fmt::Debug for AppState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AppState")
			.field("catalog", &self.catalog)
			.field("gate_opts", &self.gate_opts)
			.field("extensions", &self.extensions)
			.finish_non_exhaustive()
	}
}

pub type App = Arc<AppState>;

// vim: ts=4
