//! Type-erased extension map for AppState
//!
//! Feature crates register their own state (adapters, stores) here, so the
//! core `AppState` never names a feature type.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;

use crate::prelude::*;

#[derive(Default)]
pub struct Extensions {
	map: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Extensions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a value, replacing any previous value of the same type
	pub fn insert<T: Send + Sync + 'static>(&mut self, val: T) -> &mut Self {
		self.map.insert(TypeId::of::<T>(), Box::new(val));
		self
	}

	pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
		self.map.get(&TypeId::of::<T>())?.downcast_ref::<T>()
	}

	/// Like `get`, but a missing extension is a wiring bug reported as an internal error
	pub fn require<T: Send + Sync + 'static>(&self) -> TgResult<&T> {
		self.get::<T>()
			.ok_or_else(|| Error::Internal(format!("Extension {} is not registered", type_name::<T>())))
	}

	pub fn len(&self) -> usize {
		self.map.len()
	}

	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}
}

impl std::fmt::Debug for Extensions {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Extensions").field("len", &self.map.len()).finish()
	}
}


// vim: ts=4
