//! Option storage adapter interface
//!
//! The host persistence layer stores one value mapping per settings
//! section. The registry only ever reads and writes whole mappings,
//! never a single field in isolation.

use async_trait::async_trait;

use crate::error::MlResult;
use crate::types::FieldValues;

#[async_trait]
pub trait OptionAdapter: Send + Sync {
	/// Read the stored mapping for a section, `None` if never created
	async fn read_option(&self, section_id: &str) -> MlResult<Option<FieldValues>>;

	/// Create the stored mapping for a section. Does not overwrite an
	/// existing mapping.
	async fn create_option(&self, section_id: &str, values: &FieldValues) -> MlResult<()>;

	/// Replace the stored mapping for a section
	async fn write_option(&self, section_id: &str, values: &FieldValues) -> MlResult<()>;
}

// vim: ts=4
