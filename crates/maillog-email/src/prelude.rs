pub use maillog_types::error::{Error, MlResult};
pub use maillog_types::log_adapter::{LogAdapter, LogStatus, NewEmailLog};
pub use maillog_types::option_adapter::OptionAdapter;
pub use maillog_types::types::{FieldValues, LogId, OptionValue, Timestamp};

pub use tracing::{debug, info, warn};

// vim: ts=4
