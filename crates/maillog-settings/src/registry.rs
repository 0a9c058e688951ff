//! Settings registry
//!
//! The mutable `SettingsRegistry` collects section and field descriptors
//! during startup, then `freeze()` turns it into the immutable
//! `FrozenSettingsRegistry` used for registration, value resolution,
//! rendering and sanitization.

use std::collections::HashMap;

use maillog_types::option_adapter::OptionAdapter;

use crate::descriptor::{FieldDescriptor, SectionDescriptor};
use crate::prelude::*;

/// Host-side page layout registration consumed by [`FrozenSettingsRegistry::register`].
///
/// The host lays out the admin page; the registry tells it which sections
/// exist, which input belongs where, and which sections route their
/// submissions through [`FrozenSettingsRegistry::sanitize`].
pub trait SettingsHost {
	fn add_section(&mut self, id: &str, title: &str, description: Option<&str>);

	/// `input_name` is the submission key (`section[field]`); `field_id`
	/// is the bracket-free DOM identifier used for label/element pairing.
	fn add_field(&mut self, section_id: &str, input_name: &str, label: &str, field_id: &str);

	/// Route submitted values for the section through the sanitizer before
	/// persistence.
	fn register_setting(&mut self, section_id: &str);
}

/// Mutable registry used during startup configuration
pub struct SettingsRegistry {
	sections: Vec<SectionDescriptor>,
	fields: HashMap<String, Vec<FieldDescriptor>>,
}

impl SettingsRegistry {
	pub fn new() -> Self {
		Self { sections: Vec::new(), fields: HashMap::new() }
	}

	/// Register a new section
	pub fn add_section(&mut self, section: SectionDescriptor) -> MlResult<()> {
		if self.sections.iter().any(|s| s.id == section.id) {
			return Err(Error::ConfigError(format!(
				"Section '{}' is already registered",
				section.id
			)));
		}

		debug!("Registering settings section: {}", section.id);
		self.fields.insert(section.id.clone(), Vec::new());
		self.sections.push(section);
		Ok(())
	}

	/// Register a new field within a section
	pub fn add_field(&mut self, section_id: &str, field: FieldDescriptor) -> MlResult<()> {
		let fields = self.fields.get_mut(section_id).ok_or_else(|| {
			Error::ConfigError(format!("Unknown settings section '{}'", section_id))
		})?;
		if fields.iter().any(|f| f.name == field.name) {
			return Err(Error::ConfigError(format!(
				"Field '{}' is already registered in section '{}'",
				field.name, section_id
			)));
		}

		debug!("Registering settings field: {}.{}", section_id, field.name);
		fields.push(field);
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenSettingsRegistry {
		let count: usize = self.fields.values().map(Vec::len).sum();
		info!(
			"Freezing settings registry with {} sections and {} fields",
			self.sections.len(),
			count
		);
		FrozenSettingsRegistry { sections: self.sections, fields: self.fields }
	}

	pub fn len(&self) -> usize {
		self.fields.values().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.sections.is_empty()
	}
}

impl Default for SettingsRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Immutable registry passed to the components that need it
pub struct FrozenSettingsRegistry {
	sections: Vec<SectionDescriptor>,
	fields: HashMap<String, Vec<FieldDescriptor>>,
}

impl FrozenSettingsRegistry {
	/// Ordered section descriptors
	pub fn sections(&self) -> &[SectionDescriptor] {
		&self.sections
	}

	/// Ordered field descriptors of a section
	pub fn fields(&self, section_id: &str) -> Option<&[FieldDescriptor]> {
		self.fields.get(section_id).map(Vec::as_slice)
	}

	/// Look up one field descriptor by name
	pub fn field(&self, section_id: &str, name: &str) -> Option<&FieldDescriptor> {
		self.fields.get(section_id)?.iter().find(|f| f.name == name)
	}

	/// Mapping of every field in a section to its declared default
	pub fn default_values(&self, section_id: &str) -> FieldValues {
		let mut values = FieldValues::new();
		if let Some(fields) = self.fields.get(section_id) {
			for field in fields {
				values.insert(field.name.clone(), field.default.clone());
			}
		}
		values
	}

	/// Additive merge: populate defaults only for keys absent from the
	/// stored mapping. Present keys are never touched. Returns whether
	/// anything was added.
	pub fn merge_missing(&self, section_id: &str, stored: &mut FieldValues) -> bool {
		let Some(fields) = self.fields.get(section_id) else { return false };
		let mut changed = false;
		for field in fields {
			if !stored.contains_key(&field.name) {
				stored.insert(field.name.clone(), field.default.clone());
				changed = true;
			}
		}
		changed
	}

	/// Registration pass, run once per admin request.
	///
	/// Seeds absent section values with defaults, backfills missing keys
	/// of present ones, and registers sections, fields and the per-section
	/// sanitize entry point with the host.
	pub async fn register(
		&self,
		store: &dyn OptionAdapter,
		host: &mut dyn SettingsHost,
	) -> MlResult<()> {
		for section in &self.sections {
			match store.read_option(&section.id).await? {
				None => {
					let defaults = self.default_values(&section.id);
					debug!("Seeding section '{}' with {} defaults", section.id, defaults.len());
					store.create_option(&section.id, &defaults).await?;
				}
				Some(mut stored) => {
					if self.merge_missing(&section.id, &mut stored) {
						debug!("Backfilling missing defaults for section '{}'", section.id);
						store.write_option(&section.id, &stored).await?;
					}
				}
			}

			host.add_section(&section.id, &section.title, section.description.as_deref());
		}

		for section in &self.sections {
			if let Some(fields) = self.fields.get(&section.id) {
				for field in fields {
					let input_name = format!("{}[{}]", section.id, field.name);
					let field_id = clean_field_id(&format!("{}_{}", section.id, field.name));
					host.add_field(&section.id, &input_name, &field.label, &field_id);
				}
			}
		}

		for section in &self.sections {
			host.register_setting(&section.id);
		}

		Ok(())
	}

	/// Resolve the current value of a field: stored value if present,
	/// declared default otherwise.
	pub async fn read_value(
		&self,
		store: &dyn OptionAdapter,
		section_id: &str,
		name: &str,
	) -> MlResult<OptionValue> {
		let field = self.field(section_id, name).ok_or(Error::NotFound)?;

		if let Some(stored) = store.read_option(section_id).await? {
			if let Some(value) = stored.get(name) {
				return Ok(value.clone());
			}
		}

		Ok(field.default.clone())
	}
}

// vim: ts=4
