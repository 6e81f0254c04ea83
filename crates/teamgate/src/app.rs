//! App builder - constructs and runs the Teamgate application

use axum::Router;
use serde_json::Value;
use std::{future::Future, path::PathBuf, pin::Pin, sync::Arc};

use crate::member_adapter::MemberAdapter;
use crate::prelude::*;
use crate::routes;
pub use teamgate_core::app::{App, AppState, VERSION};
use teamgate_core::config::{self, ConfigRegistry};
use teamgate_core::extensions::Extensions;

/// Type alias for async initialization callbacks
type InitCallback =
	Box<dyn FnOnce(App) -> Pin<Box<dyn Future<Output = TgResult<()>> + Send>> + Send>;

#[derive(Debug, Default)]
pub struct AppBuilderOpts {
	/// Overrides `server.listen`
	pub listen: Option<Box<str>>,
	/// YAML file with app-level config overrides
	pub config_file: Option<PathBuf>,
	/// Inline overrides, applied on top of the config file
	pub overrides: Value,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	member_adapter: Option<Arc<dyn MemberAdapter>>,
	on_init: Vec<InitCallback>,
}

impl AppBuilder {
	pub fn new() -> Self {
		// Ignored when a subscriber is already installed, e.g. a second app in tests
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder { opts: AppBuilderOpts::default(), member_adapter: None, on_init: Vec::new() }
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = Some(listen.into());
		self
	}
	pub fn config_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
		self.opts.config_file = Some(path.into());
		self
	}
	pub fn config_overrides(&mut self, overrides: Value) -> &mut Self {
		self.opts.overrides = overrides;
		self
	}

	// Adapters
	pub fn member_adapter(&mut self, member_adapter: Arc<dyn MemberAdapter>) -> &mut Self {
		self.member_adapter = Some(member_adapter);
		self
	}

	/// Register an async callback that runs once the app state exists,
	/// before the server starts listening
	pub fn on_init<F, Fut>(&mut self, f: F) -> &mut Self
	where
		F: FnOnce(App) -> Fut + Send + 'static,
		Fut: Future<Output = TgResult<()>> + Send + 'static,
	{
		self.on_init.push(Box::new(move |app| Box::pin(f(app))));
		self
	}

	/// Resolve the configuration and create the app state with its router
	pub async fn build(self) -> TgResult<(App, Router)> {
		let mut registry = ConfigRegistry::new();
		teamgate_core::register_defaults(&mut registry)?;
		info!("Registered {} config namespaces", registry.len());

		let mut overrides = match &self.opts.config_file {
			Some(path) => config::loader::load_overrides(path).await?,
			None => Value::Null,
		};
		if !self.opts.overrides.is_null() {
			config::merge(&mut overrides, self.opts.overrides);
		}
		let config = registry.freeze(overrides).inspect_err(|e| {
			error!("FATAL: Invalid configuration: {}", e);
		})?;

		let Some(member_adapter) = self.member_adapter else {
			error!("FATAL: No member adapter configured");
			return Err(Error::Internal("No member adapter configured".to_string()));
		};

		// Build extensions map for feature-specific state
		let mut extensions = Extensions::new();
		extensions.insert::<Arc<dyn MemberAdapter>>(member_adapter);

		let app: App = Arc::new(AppState::new(config, extensions)?);
		info!(
			"Catalog loaded: {} roles, {} plans, {} permissions, {} capabilities",
			app.catalog.roles().count(),
			app.catalog.plans().count(),
			app.catalog.permissions().count(),
			app.catalog.capabilities().count(),
		);

		let router = routes::init(&app);

		// Run custom init callbacks
		for callback in self.on_init {
			callback(app.clone()).await?;
		}

		Ok((app, router))
	}

	pub async fn run(self) -> TgResult<()> {
		info!(" _____                                 _");
		info!("|_   _|__  __ _ _ __ ___   __ _  __ _| |_ ___");
		info!("  | |/ _ \\/ _` | '_ ` _ \\ / _` |/ _` | __/ _ \\");
		info!("  | |  __/ (_| | | | | | | (_| | (_| | ||  __/");
		info!("  |_|\\___|\\__,_|_| |_| |_|\\__, |\\__,_|\\__\\___|");
		info!("                          |___/");
		info!("V{}", VERSION);
		info!("");

		let listen_opt = self.opts.listen.clone();
		let (app, router) = self.build().await?;
		let listen = match listen_opt {
			Some(listen) => listen,
			None => app.config.require::<String>("server", "listen")?.into(),
		};

		let listener = tokio::net::TcpListener::bind(listen.as_ref()).await.map_err(|e| {
			error!("FATAL: Cannot listen on {}: {}", listen, e);
			Error::Io(e)
		})?;
		info!("Listening on HTTP {}", listen);

		axum::serve(listener, router).await?;
		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
