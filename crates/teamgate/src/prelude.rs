pub use teamgate_core::prelude::*;

// vim: ts=4
