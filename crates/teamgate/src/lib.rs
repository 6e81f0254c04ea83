//! Teamgate is a multi-tenant SaaS scaffold.
//!
//! # Features
//!
//! - Teams with roles and role based permissions
//! - Subscription plans granting capabilities
//!     - routes gated by capability redirect to the subscription page
//! - Admin accounts with a separate admin API
//! - Declarative request validation
//!     - every field checked, every failure reported at once
//!     - shared list validator and pagination for search endpoints
//! - Layered YAML configuration over framework defaults

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

// Re-export shared types and adapter traits from teamgate-types
pub use teamgate_types::error;
pub use teamgate_types::member_adapter;
pub use teamgate_types::model;
pub use teamgate_types::principal;
pub use teamgate_types::types;

// Core re-exports
pub use teamgate_core::access;
pub use teamgate_core::auth;
pub use teamgate_core::catalog;
pub use teamgate_core::config;
pub use teamgate_core::controller;
pub use teamgate_core::gate;
pub use teamgate_core::validate;

// Feature crate re-exports
pub use teamgate_admin as admin;

// Local modules
pub mod account;
pub mod app;
pub mod members;
pub mod prelude;
pub mod routes;

pub use crate::app::{App, AppBuilder};

// vim: ts=4
