pub use crate::app::App;
pub use teamgate_types::error::{Error, TgResult, ValidationError};
pub use teamgate_types::principal::{AccountType, Principal};
pub use teamgate_types::types::Timestamp;

pub use tracing::{debug, error, info, warn};

// vim: ts=4
