pub use crate::error::{Error, TgResult, ValidationError};
pub use crate::types::Timestamp;

pub use tracing::{debug, error, info, warn};

// vim: ts=4
