pub use maillog_types::error::{Error, MlResult};
pub use maillog_types::types::{FieldValues, OptionValue};
pub use maillog_types::utils::{clean_field_id, escape_html};

pub use tracing::{debug, info, warn};

// vim: ts=4
