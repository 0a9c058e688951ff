//! Section and field descriptors
//!
//! Descriptors are constructed once at startup and held for the lifetime
//! of the owning registry. A field belongs to exactly one section; the
//! section id doubles as the storage key for the whole value mapping.

use std::fmt::Debug;

use crate::prelude::*;

/// Type alias for per-field sanitize callback
pub type SanitizeFn = Box<dyn Fn(&OptionValue) -> OptionValue + Send + Sync>;

/// A named, independently persisted group of settings fields
#[derive(Debug, Clone)]
pub struct SectionDescriptor {
	pub id: String,
	pub title: String,
	pub description: Option<String>,
}

impl SectionDescriptor {
	pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
		Self { id: id.into(), title: title.into(), description: None }
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}
}

/// Field kind selects the rendering and sanitization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
	Text,
	Url,
	Number,
	Password,
	Checkbox,
	Multicheck,
	Radio,
	Select,
	Multiselect,
	Textarea,
	Html,
	Wysiwyg,
	File,
	Color,
	Heading,
	Subheading,
	Repeat,
}

impl FieldKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldKind::Text => "text",
			FieldKind::Url => "url",
			FieldKind::Number => "number",
			FieldKind::Password => "password",
			FieldKind::Checkbox => "checkbox",
			FieldKind::Multicheck => "multicheck",
			FieldKind::Radio => "radio",
			FieldKind::Select => "select",
			FieldKind::Multiselect => "multiselect",
			FieldKind::Textarea => "textarea",
			FieldKind::Html => "html",
			FieldKind::Wysiwyg => "wysiwyg",
			FieldKind::File => "file",
			FieldKind::Color => "color",
			FieldKind::Heading => "heading",
			FieldKind::Subheading => "subheading",
			FieldKind::Repeat => "repeat",
		}
	}

	/// Kinds whose submitted value is an ordered sequence
	pub fn is_multi(&self) -> bool {
		matches!(self, FieldKind::Multicheck | FieldKind::Multiselect)
	}
}

impl std::fmt::Display for FieldKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One configurable value within a section
pub struct FieldDescriptor {
	/// Storage key, unique within the section
	pub name: String,
	pub label: String,
	pub kind: FieldKind,
	pub default: OptionValue,
	pub description: String,
	pub placeholder: String,
	/// CSS size class fragment (e.g. "regular", "small")
	pub size: Option<String>,
	pub min: Option<String>,
	pub max: Option<String>,
	pub step: Option<String>,
	/// Ordered option key/label pairs for choice kinds
	pub options: Vec<(String, String)>,
	/// Repeatable groups: render per-instance drag handles
	pub sortable: bool,
	/// Repeatable groups: render an "Add New" control
	pub allow_new: bool,
	/// Nested field list for repeatable groups
	pub fields: Vec<FieldDescriptor>,
	/// Optional opt-in transformation applied to the submitted value
	pub sanitize: Option<SanitizeFn>,
}

impl Debug for FieldDescriptor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FieldDescriptor")
			.field("name", &self.name)
			.field("label", &self.label)
			.field("kind", &self.kind)
			.field("default", &self.default)
			.field("options", &self.options)
			.field("sortable", &self.sortable)
			.field("allow_new", &self.allow_new)
			.field("fields", &self.fields)
			.field("sanitize", &self.sanitize.is_some())
			.finish()
	}
}

impl FieldDescriptor {
	/// Create a builder for constructing a FieldDescriptor
	pub fn builder(name: impl Into<String>, kind: FieldKind) -> FieldDescriptorBuilder {
		FieldDescriptorBuilder::new(name, kind)
	}
}

/// Builder for FieldDescriptor with fluent API
pub struct FieldDescriptorBuilder {
	name: String,
	kind: FieldKind,
	label: Option<String>,
	default: OptionValue,
	description: String,
	placeholder: String,
	size: Option<String>,
	min: Option<String>,
	max: Option<String>,
	step: Option<String>,
	options: Vec<(String, String)>,
	sortable: bool,
	allow_new: bool,
	fields: Vec<FieldDescriptor>,
	sanitize: Option<SanitizeFn>,
}

impl FieldDescriptorBuilder {
	pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
		Self {
			name: name.into(),
			kind,
			label: None,
			default: OptionValue::default(),
			description: String::new(),
			placeholder: String::new(),
			size: None,
			min: None,
			max: None,
			step: None,
			options: Vec::new(),
			sortable: false,
			allow_new: false,
			fields: Vec::new(),
			sanitize: None,
		}
	}

	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn default(mut self, value: OptionValue) -> Self {
		self.default = value;
		self
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = placeholder.into();
		self
	}

	pub fn size(mut self, size: impl Into<String>) -> Self {
		self.size = Some(size.into());
		self
	}

	pub fn min(mut self, min: impl Into<String>) -> Self {
		self.min = Some(min.into());
		self
	}

	pub fn max(mut self, max: impl Into<String>) -> Self {
		self.max = Some(max.into());
		self
	}

	pub fn step(mut self, step: impl Into<String>) -> Self {
		self.step = Some(step.into());
		self
	}

	/// Append one option; declaration order is preserved when rendering
	pub fn option(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
		self.options.push((key.into(), label.into()));
		self
	}

	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	pub fn allow_new(mut self, allow_new: bool) -> Self {
		self.allow_new = allow_new;
		self
	}

	/// Append a nested field (repeatable groups only)
	pub fn field(mut self, field: FieldDescriptor) -> Self {
		self.fields.push(field);
		self
	}

	/// Set an opt-in sanitize callback
	pub fn sanitize<F>(mut self, f: F) -> Self
	where
		F: Fn(&OptionValue) -> OptionValue + Send + Sync + 'static,
	{
		self.sanitize = Some(Box::new(f));
		self
	}

	/// Build the FieldDescriptor
	pub fn build(self) -> MlResult<FieldDescriptor> {
		if self.name.is_empty() {
			return Err(Error::ConfigError("Field name is required".into()));
		}
		if self.kind == FieldKind::Repeat && self.fields.is_empty() {
			return Err(Error::ConfigError(format!(
				"Repeatable field '{}' declares no nested fields",
				self.name
			)));
		}
		if self.kind != FieldKind::Repeat && !self.fields.is_empty() {
			return Err(Error::ConfigError(format!(
				"Field '{}' is not repeatable but declares nested fields",
				self.name
			)));
		}

		Ok(FieldDescriptor {
			name: self.name,
			kind: self.kind,
			label: self.label.unwrap_or_default(),
			default: self.default,
			description: self.description,
			placeholder: self.placeholder,
			size: self.size,
			min: self.min,
			max: self.max,
			step: self.step,
			options: self.options,
			sortable: self.sortable,
			allow_new: self.allow_new,
			fields: self.fields,
			sanitize: self.sanitize,
		})
	}
}

// vim: ts=4
