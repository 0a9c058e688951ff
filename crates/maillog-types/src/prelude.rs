pub use crate::error::{Error, MlResult};
pub use crate::types::{FieldValues, LogId, OptionValue, Timestamp};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
