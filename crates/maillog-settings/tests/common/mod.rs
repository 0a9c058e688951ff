//! Shared test doubles: in-memory option store and a recording host

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use maillog_settings::SettingsHost;
use maillog_types::error::MlResult;
use maillog_types::option_adapter::OptionAdapter;
use maillog_types::types::FieldValues;

#[derive(Default)]
pub struct MemoryOptionStore {
	values: Mutex<HashMap<String, FieldValues>>,
}

impl MemoryOptionStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, name: &str) -> Option<FieldValues> {
		self.values.lock().expect("lock poisoned").get(name).cloned()
	}

	pub fn set(&self, name: &str, values: FieldValues) {
		self.values.lock().expect("lock poisoned").insert(name.to_string(), values);
	}
}

#[async_trait]
impl OptionAdapter for MemoryOptionStore {
	async fn read_option(&self, section_id: &str) -> MlResult<Option<FieldValues>> {
		Ok(self.get(section_id))
	}

	async fn create_option(&self, section_id: &str, values: &FieldValues) -> MlResult<()> {
		self.set(section_id, values.clone());
		Ok(())
	}

	async fn write_option(&self, section_id: &str, values: &FieldValues) -> MlResult<()> {
		self.set(section_id, values.clone());
		Ok(())
	}
}

/// Records every host registration call for later assertions
#[derive(Default)]
pub struct RecordingHost {
	pub sections: Vec<String>,
	/// (section_id, input_name, field_id)
	pub fields: Vec<(String, String, String)>,
	pub registered: Vec<String>,
}

impl SettingsHost for RecordingHost {
	fn add_section(&mut self, id: &str, _title: &str, _description: Option<&str>) {
		self.sections.push(id.to_string());
	}

	fn add_field(&mut self, section_id: &str, input_name: &str, _label: &str, field_id: &str) {
		self.fields.push((section_id.to_string(), input_name.to_string(), field_id.to_string()));
	}

	fn register_setting(&mut self, section_id: &str) {
		self.registered.push(section_id.to_string());
	}
}

// vim: ts=4
