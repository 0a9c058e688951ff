//! Field-kind-specific HTML renderers
//!
//! One renderer per [`FieldKind`], dispatched through an explicit map so
//! an unregistered kind is a checkable error instead of a runtime lookup
//! failure. Renderers write directly to the output stream and append the
//! shared description fragment.
//!
//! Two naming conventions are used in lockstep: the submission key
//! `name="section[field]"` and the bracket-free DOM id `section_field`
//! used for label/element pairing and client-side scripting hooks.

use std::collections::HashMap;
use std::fmt::Write;

use crate::descriptor::{FieldDescriptor, FieldKind};
use crate::prelude::*;
use crate::registry::FrozenSettingsRegistry;

/// Everything a renderer needs to know about its place on the page.
///
/// For nested fields inside a repeatable group, `section` carries the
/// instance namespace (`section[field][index]`) so input names and DOM
/// ids come out right without renderers knowing about recursion.
pub struct RenderContext<'a> {
	pub section: &'a str,
	pub field: &'a FieldDescriptor,
}

impl RenderContext<'_> {
	/// Submission key: `section[field]`
	pub fn input_name(&self) -> String {
		format!("{}[{}]", self.section, self.field.name)
	}

	/// DOM identifier: `section_field` with structural brackets folded
	pub fn field_id(&self) -> String {
		clean_field_id(&format!("{}_{}", self.section, self.field.name))
	}

	fn size_class(&self, fallback: &str) -> String {
		self.field.size.clone().unwrap_or_else(|| fallback.into())
	}
}

/// Common capability interface of all field renderers
pub trait FieldRenderer: Send + Sync {
	fn render(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		renderers: &Renderers,
		value: &OptionValue,
	) -> MlResult<()>;
}

/// Mapping from field kind to renderer
pub struct Renderers {
	map: HashMap<FieldKind, Box<dyn FieldRenderer>>,
}

impl Renderers {
	/// Empty map; every kind must be registered explicitly
	pub fn empty() -> Self {
		Self { map: HashMap::new() }
	}

	/// The standard renderer set covering every [`FieldKind`]
	pub fn standard() -> Self {
		let mut r = Self::empty();
		r.insert(FieldKind::Text, Box::new(TextRenderer { input_type: "text" }));
		r.insert(FieldKind::Url, Box::new(TextRenderer { input_type: "url" }));
		r.insert(FieldKind::Number, Box::new(NumberRenderer));
		r.insert(FieldKind::Password, Box::new(PasswordRenderer));
		r.insert(FieldKind::Checkbox, Box::new(CheckboxRenderer));
		r.insert(FieldKind::Multicheck, Box::new(MulticheckRenderer));
		r.insert(FieldKind::Radio, Box::new(RadioRenderer));
		r.insert(FieldKind::Select, Box::new(SelectRenderer));
		r.insert(FieldKind::Multiselect, Box::new(MultiselectRenderer));
		r.insert(FieldKind::Textarea, Box::new(TextareaRenderer));
		r.insert(FieldKind::Html, Box::new(HtmlRenderer));
		r.insert(FieldKind::Wysiwyg, Box::new(WysiwygRenderer));
		r.insert(FieldKind::File, Box::new(FileRenderer));
		r.insert(FieldKind::Color, Box::new(ColorRenderer));
		r.insert(FieldKind::Heading, Box::new(HeadingRenderer { level: 3 }));
		r.insert(FieldKind::Subheading, Box::new(HeadingRenderer { level: 4 }));
		r.insert(FieldKind::Repeat, Box::new(RepeatRenderer));
		r
	}

	/// Register or override the renderer for a kind
	pub fn insert(&mut self, kind: FieldKind, renderer: Box<dyn FieldRenderer>) {
		self.map.insert(kind, renderer);
	}

	fn get(&self, kind: FieldKind) -> MlResult<&dyn FieldRenderer> {
		self.map
			.get(&kind)
			.map(Box::as_ref)
			.ok_or_else(|| Error::UnknownFieldKind(kind.as_str().into()))
	}

	/// Render one field with its resolved current value
	pub fn render_field(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		value: &OptionValue,
	) -> MlResult<()> {
		self.get(ctx.field.kind)?.render(out, ctx, self, value)
	}
}

impl Default for Renderers {
	fn default() -> Self {
		Self::standard()
	}
}

impl FrozenSettingsRegistry {
	/// Render one field of a section against the full stored mapping,
	/// falling back to the field default when the key is absent.
	pub fn render_field(
		&self,
		out: &mut dyn Write,
		renderers: &Renderers,
		section_id: &str,
		name: &str,
		values: &FieldValues,
	) -> MlResult<()> {
		let field = self.field(section_id, name).ok_or(Error::NotFound)?;
		let value = values.get(name).cloned().unwrap_or_else(|| field.default.clone());
		let ctx = RenderContext { section: section_id, field };
		renderers.render_field(out, &ctx, &value)
	}

	/// Render the section tab strip (first tab active)
	pub fn render_navigation(&self, out: &mut dyn Write) -> MlResult<()> {
		write!(out, r#"<h2 class="nav-tab-wrapper">"#)?;
		for (i, section) in self.sections().iter().enumerate() {
			let active = if i == 0 { " nav-tab-active" } else { "" };
			write!(
				out,
				r##"<a data-tabid="{id}" href="#{id}" class="nav-tab{active}" id="{id}-tab">{title}</a>"##,
				id = escape_html(&section.id),
				active = active,
				title = escape_html(&section.title),
			)?;
		}
		write!(out, "</h2>")?;
		Ok(())
	}
}

fn description_html(out: &mut dyn Write, field: &FieldDescriptor) -> MlResult<()> {
	if !field.description.is_empty() {
		write!(out, r#"<p class="description">{}</p>"#, escape_html(&field.description))?;
	}
	Ok(())
}

fn checked(on: bool) -> &'static str {
	if on { r#" checked="checked""# } else { "" }
}

fn selected(on: bool) -> &'static str {
	if on { r#" selected="selected""# } else { "" }
}

/// Selected keys first (in stored order), remaining options in declared
/// order. Stored keys without a declared option keep themselves as label.
fn selected_first<'a>(
	options: &'a [(String, String)],
	value: &'a [String],
) -> Vec<(&'a str, &'a str)> {
	let mut ordered: Vec<(&str, &str)> = Vec::with_capacity(options.len() + value.len());
	for key in value {
		let label = options
			.iter()
			.find(|(k, _)| k == key)
			.map_or(key.as_str(), |(_, label)| label.as_str());
		ordered.push((key.as_str(), label));
	}
	for (key, label) in options {
		if !value.contains(key) {
			ordered.push((key.as_str(), label.as_str()));
		}
	}
	ordered
}

// Single-line text input //
//************************//
struct TextRenderer {
	input_type: &'static str,
}

impl FieldRenderer for TextRenderer {
	fn render(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		_renderers: &Renderers,
		value: &OptionValue,
	) -> MlResult<()> {
		let placeholder = if ctx.field.placeholder.is_empty() {
			String::new()
		} else {
			format!(r#" placeholder="{}""#, escape_html(&ctx.field.placeholder))
		};
		write!(
			out,
			r#"<input type="{typ}" class="{size}-text" id="{id}" name="{name}" value="{value}"{placeholder}/>"#,
			typ = self.input_type,
			size = ctx.size_class("regular"),
			id = ctx.field_id(),
			name = ctx.input_name(),
			value = escape_html(value.as_str().unwrap_or("")),
			placeholder = placeholder,
		)?;
		description_html(out, ctx.field)
	}
}

// Number input //
//**************//
struct NumberRenderer;

impl FieldRenderer for NumberRenderer {
	fn render(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		_renderers: &Renderers,
		value: &OptionValue,
	) -> MlResult<()> {
		let mut extra = String::new();
		if !ctx.field.placeholder.is_empty() {
			write!(extra, r#" placeholder="{}""#, escape_html(&ctx.field.placeholder))?;
		}
		for (attr, constraint) in
			[("min", &ctx.field.min), ("max", &ctx.field.max), ("step", &ctx.field.step)]
		{
			if let Some(constraint) = constraint {
				write!(extra, r#" {}="{}""#, attr, escape_html(constraint))?;
			}
		}
		write!(
			out,
			r#"<input type="number" class="{size}-number" id="{id}" name="{name}" value="{value}"{extra}/>"#,
			size = ctx.size_class("regular"),
			id = ctx.field_id(),
			name = ctx.input_name(),
			value = escape_html(value.as_str().unwrap_or("")),
			extra = extra,
		)?;
		description_html(out, ctx.field)
	}
}

// Password input //
//****************//
struct PasswordRenderer;

impl FieldRenderer for PasswordRenderer {
	fn render(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		_renderers: &Renderers,
		value: &OptionValue,
	) -> MlResult<()> {
		write!(
			out,
			r#"<input type="password" autocomplete="new-password" class="{size}-text password-toggle" id="{id}" name="{name}" value="{value}"/>"#,
			size = ctx.size_class("regular"),
			id = ctx.field_id(),
			name = ctx.input_name(),
			value = escape_html(value.as_str().unwrap_or("")),
		)?;
		description_html(out, ctx.field)
	}
}

// Checkbox toggle //
//*****************//
struct CheckboxRenderer;

impl FieldRenderer for CheckboxRenderer {
	fn render(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		_renderers: &Renderers,
		value: &OptionValue,
	) -> MlResult<()> {
		let on = value.as_str() == Some("on");
		let id = ctx.field_id();
		let name = ctx.input_name();
		write!(out, "<fieldset>")?;
		write!(out, r#"<label for="{}">"#, id)?;
		// Hidden sentinel: the key is submitted even when unchecked
		write!(out, r#"<input type="hidden" name="{}" value="off"/>"#, name)?;
		write!(
			out,
			r#"<input type="checkbox" class="checkbox" id="{id}" name="{name}" value="on"{checked}/>"#,
			id = id,
			name = name,
			checked = checked(on),
		)?;
		write!(out, " {}</label>", escape_html(&ctx.field.description))?;
		write!(out, "</fieldset>")?;
		Ok(())
	}
}

// Multi checkbox //
//****************//
struct MulticheckRenderer;

impl FieldRenderer for MulticheckRenderer {
	fn render(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		_renderers: &Renderers,
		value: &OptionValue,
	) -> MlResult<()> {
		let selected_keys = value.as_seq().unwrap_or(&[]);
		let sortable = if ctx.field.sortable { " multicheck-fields-sortable" } else { "" };
		let id = ctx.field_id();
		let name = ctx.input_name();

		write!(out, r#"<fieldset class="multicheck-fields{}">"#, sortable)?;
		// Sentinel so the key is submitted even with nothing checked
		write!(out, r#"<input type="hidden" name="{}[]" value=""/>"#, name)?;
		for (key, label) in selected_first(&ctx.field.options, selected_keys) {
			let is_selected = selected_keys.iter().any(|k| k == key);
			let key_id = clean_field_id(&format!("{}_{}", id, key));
			write!(out, r#"<p class="multicheck-field">"#)?;
			if ctx.field.sortable {
				write!(out, r#"<span class="multicheck-field-handle"></span>"#)?;
			}
			write!(out, r#"<label for="{}">"#, key_id)?;
			write!(
				out,
				r#"<input type="checkbox" class="checkbox" id="{key_id}" name="{name}[]" value="{key}"{checked}/>"#,
				key_id = key_id,
				name = name,
				key = escape_html(key),
				checked = checked(is_selected),
			)?;
			write!(out, " {}</label></p>", escape_html(label))?;
		}
		description_html(out, ctx.field)?;
		write!(out, "</fieldset>")?;
		Ok(())
	}
}

// Radio group //
//*************//
struct RadioRenderer;

impl FieldRenderer for RadioRenderer {
	fn render(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		_renderers: &Renderers,
		value: &OptionValue,
	) -> MlResult<()> {
		let current = value.as_str().unwrap_or("");
		let id = ctx.field_id();
		let name = ctx.input_name();

		write!(out, r#"<fieldset class="radio-fields">"#)?;
		for (key, label) in &ctx.field.options {
			let key_id = clean_field_id(&format!("{}_{}", id, key));
			write!(out, r#"<label for="{}">"#, key_id)?;
			write!(
				out,
				r#"<input type="radio" class="radio" id="{key_id}" name="{name}" value="{key}"{checked}/>"#,
				key_id = key_id,
				name = name,
				key = escape_html(key),
				checked = checked(current == key),
			)?;
			write!(out, " {}</label>", escape_html(label))?;
		}
		description_html(out, ctx.field)?;
		write!(out, "</fieldset>")?;
		Ok(())
	}
}

// Select box //
//************//
struct SelectRenderer;

impl FieldRenderer for SelectRenderer {
	fn render(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		_renderers: &Renderers,
		value: &OptionValue,
	) -> MlResult<()> {
		let current = value.as_str().unwrap_or("");
		write!(
			out,
			r#"<select class="{size}" id="{id}" name="{name}">"#,
			size = ctx.size_class("regular"),
			id = ctx.field_id(),
			name = ctx.input_name(),
		)?;
		for (key, label) in &ctx.field.options {
			write!(
				out,
				r#"<option value="{key}"{selected}>{label}</option>"#,
				key = escape_html(key),
				selected = selected(current == key),
				label = escape_html(label),
			)?;
		}
		write!(out, "</select>")?;
		description_html(out, ctx.field)
	}
}

// Multi select //
//**************//
struct MultiselectRenderer;

impl FieldRenderer for MultiselectRenderer {
	fn render(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		_renderers: &Renderers,
		value: &OptionValue,
	) -> MlResult<()> {
		let selected_keys = value.as_seq().unwrap_or(&[]);
		let name = ctx.input_name();
		let placeholder = if ctx.field.placeholder.is_empty() {
			"Please Select"
		} else {
			&ctx.field.placeholder
		};

		// Sentinel so the key is submitted even with nothing selected
		write!(out, r#"<input type="hidden" name="{}[]" value=""/>"#, name)?;
		write!(
			out,
			r#"<select multiple class="{size}" id="{id}" name="{name}[]" data-placeholder="{placeholder}">"#,
			size = ctx.size_class("regular"),
			id = ctx.field_id(),
			name = name,
			placeholder = escape_html(placeholder),
		)?;
		for (key, label) in selected_first(&ctx.field.options, selected_keys) {
			let is_selected = selected_keys.iter().any(|k| k == key);
			write!(
				out,
				r#"<option value="{key}"{selected}>{label}</option>"#,
				key = escape_html(key),
				selected = selected(is_selected),
				label = escape_html(label),
			)?;
		}
		write!(out, "</select>")?;
		description_html(out, ctx.field)
	}
}

// Textarea //
//**********//
struct TextareaRenderer;

impl FieldRenderer for TextareaRenderer {
	fn render(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		_renderers: &Renderers,
		value: &OptionValue,
	) -> MlResult<()> {
		write!(
			out,
			r#"<textarea rows="5" cols="55" class="{size}-text" id="{id}" name="{name}">{value}</textarea>"#,
			size = ctx.size_class("regular"),
			id = ctx.field_id(),
			name = ctx.input_name(),
			value = escape_html(value.as_str().unwrap_or("")),
		)?;
		description_html(out, ctx.field)
	}
}

// Static HTML //
//*************//
struct HtmlRenderer;

impl FieldRenderer for HtmlRenderer {
	fn render(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		_renderers: &Renderers,
		_value: &OptionValue,
	) -> MlResult<()> {
		description_html(out, ctx.field)
	}
}

// Rich text editor //
//******************//
struct WysiwygRenderer;

impl FieldRenderer for WysiwygRenderer {
	fn render(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		_renderers: &Renderers,
		value: &OptionValue,
	) -> MlResult<()> {
		write!(
			out,
			r#"<div class="wysiwyg-wrap" style="max-width: {};">"#,
			ctx.size_class("500px"),
		)?;
		write!(
			out,
			r#"<textarea rows="10" class="wysiwyg" id="{id}" name="{name}">{value}</textarea>"#,
			id = ctx.field_id(),
			name = ctx.input_name(),
			value = escape_html(value.as_str().unwrap_or("")),
		)?;
		write!(out, "</div>")?;
		description_html(out, ctx.field)
	}
}

// File picker //
//*************//
struct FileRenderer;

impl FieldRenderer for FileRenderer {
	fn render(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		_renderers: &Renderers,
		value: &OptionValue,
	) -> MlResult<()> {
		let button_label = ctx
			.field
			.options
			.iter()
			.find(|(key, _)| key == "button_label")
			.map_or("Choose File", |(_, label)| label.as_str());
		write!(
			out,
			r#"<input type="text" class="{size}-text file-url" id="{id}" name="{name}" value="{value}"/>"#,
			size = ctx.size_class("regular"),
			id = ctx.field_id(),
			name = ctx.input_name(),
			value = escape_html(value.as_str().unwrap_or("")),
		)?;
		write!(
			out,
			r#"<input type="button" class="button file-browse" value="{}"/>"#,
			escape_html(button_label),
		)?;
		description_html(out, ctx.field)
	}
}

// Color picker //
//**************//
struct ColorRenderer;

impl FieldRenderer for ColorRenderer {
	fn render(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		_renderers: &Renderers,
		value: &OptionValue,
	) -> MlResult<()> {
		write!(
			out,
			r#"<input type="text" class="{size}-text color-picker" id="{id}" name="{name}" value="{value}" data-default-color="{default}"/>"#,
			size = ctx.size_class("regular"),
			id = ctx.field_id(),
			name = ctx.input_name(),
			value = escape_html(value.as_str().unwrap_or("")),
			default = escape_html(ctx.field.default.as_str().unwrap_or("")),
		)?;
		description_html(out, ctx.field)
	}
}

// Heading //
//*********//
struct HeadingRenderer {
	level: u8,
}

impl FieldRenderer for HeadingRenderer {
	fn render(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		_renderers: &Renderers,
		_value: &OptionValue,
	) -> MlResult<()> {
		let class = if self.level == 3 { "setting-heading" } else { "setting-subheading" };
		write!(
			out,
			r#"<h{level} class="{class}">{label}</h{level}>"#,
			level = self.level,
			class = class,
			label = escape_html(&ctx.field.label),
		)?;
		description_html(out, ctx.field)
	}
}

// Repeatable group //
//******************//
struct RepeatRenderer;

impl FieldRenderer for RepeatRenderer {
	fn render(
		&self,
		out: &mut dyn Write,
		ctx: &RenderContext<'_>,
		renderers: &Renderers,
		value: &OptionValue,
	) -> MlResult<()> {
		let instances = value.as_items().unwrap_or(&[]);

		write!(out, r#"<div class="repeat-field-wrap">"#)?;
		write!(out, r#"<div class="repeat-field-items">"#)?;
		for (index, instance) in instances.iter().enumerate() {
			write!(out, r#"<div class="repeat-field-item">"#)?;
			write!(out, "<h5>{} #{}", escape_html(&ctx.field.label), index + 1)?;
			if ctx.field.sortable {
				write!(out, r#"<span class="repeat-field-item-sort"></span>"#)?;
			}
			write!(out, r#"<span class="repeat-field-item-toggle"></span>"#)?;
			if ctx.field.allow_new {
				// Instances added at runtime can also be removed
				write!(out, r#"<span class="repeat-field-item-delete"></span>"#)?;
			}
			write!(out, "</h5>")?;

			let nested_section = format!("{}[{}][{}]", ctx.section, ctx.field.name, index);
			write!(out, r#"<table class="repeat-field-rows">"#)?;
			for nested in &ctx.field.fields {
				let nested_ctx = RenderContext { section: &nested_section, field: nested };
				let nested_value =
					instance.get(&nested.name).cloned().unwrap_or_else(|| nested.default.clone());

				write!(
					out,
					r#"<tr class="repeat-field-row"><td><label class="main-label" for="{}">{}</label></td><td>"#,
					nested_ctx.field_id(),
					escape_html(&nested.label),
				)?;
				renderers.render_field(out, &nested_ctx, &nested_value)?;
				write!(out, "</td></tr>")?;
			}
			write!(out, "</table>")?;
			write!(out, "</div>")?;
		}
		write!(out, "</div>")?;

		if ctx.field.allow_new {
			// data-index carries the next instance index for client-side cloning
			write!(
				out,
				r##"<p class="repeat-field-actions"><a data-index="{index}" data-section="{section}" data-field="{field}" class="button repeat-field-new" href="#">Add New</a></p>"##,
				index = instances.len(),
				section = escape_html(ctx.section),
				field = escape_html(&ctx.field.name),
			)?;
		}
		write!(out, "</div>")?;
		description_html(out, ctx.field)
	}
}

// vim: ts=4
