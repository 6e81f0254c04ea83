//! Shared types and error handling for the Teamgate platform.
//!
//! This crate holds the vocabulary every other crate speaks: the error type
//! and its HTTP rendering, the authenticated principal with its role and
//! subscription, and the field/model presentation layer.

pub mod error;
pub mod member_adapter;
pub mod model;
pub mod prelude;
pub mod principal;
pub mod types;

// vim: ts=4
