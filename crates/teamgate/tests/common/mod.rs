//! Common test utilities and helpers
//!
//! Shared infrastructure for the integration tests: an app built through
//! `AppBuilder` on top of a seeded in-memory member adapter, token fixtures
//! and a request helper driving the router with `oneshot`.

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;

// vim: ts=4
