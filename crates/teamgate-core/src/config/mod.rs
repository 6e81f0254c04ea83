//! Layered configuration: framework defaults overridden by app-level values

pub mod defaults;
pub mod loader;
pub mod types;

pub use types::{Config, ConfigRegistry, merge};

// vim: ts=4
