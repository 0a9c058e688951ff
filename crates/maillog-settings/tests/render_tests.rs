//! Field renderer output tests

use maillog_settings::{
	FieldDescriptor, FieldKind, RenderContext, Renderers, SectionDescriptor, SettingsRegistry,
};
use maillog_types::error::Error;
use maillog_types::types::{FieldValues, OptionValue};

fn render(field: &FieldDescriptor, value: &OptionValue) -> String {
	let renderers = Renderers::standard();
	let ctx = RenderContext { section: "general", field };
	let mut out = String::new();
	renderers.render_field(&mut out, &ctx, value).unwrap();
	out
}

#[test]
fn test_text_field_markup() {
	let field = FieldDescriptor::builder("title", FieldKind::Text)
		.label("Title")
		.placeholder("A title")
		.description("Shown at the top")
		.build()
		.unwrap();
	let out = render(&field, &OptionValue::str("Hello"));

	assert!(out.contains(r#"name="general[title]""#), "{}", out);
	assert!(out.contains(r#"id="general_title""#), "{}", out);
	assert!(out.contains(r#"value="Hello""#), "{}", out);
	assert!(out.contains(r#"placeholder="A title""#), "{}", out);
	assert!(out.contains(r#"<p class="description">Shown at the top</p>"#), "{}", out);
}

#[test]
fn test_text_field_escapes_value() {
	let field = FieldDescriptor::builder("title", FieldKind::Text).label("Title").build().unwrap();
	let out = render(&field, &OptionValue::str(r#"<script>"x"</script>"#));

	assert!(!out.contains("<script>"), "{}", out);
	assert!(out.contains("&lt;script&gt;&quot;x&quot;&lt;/script&gt;"), "{}", out);
}

#[test]
fn test_number_field_constraints() {
	let field = FieldDescriptor::builder("days", FieldKind::Number)
		.label("Days")
		.min("1")
		.max("365")
		.build()
		.unwrap();
	let out = render(&field, &OptionValue::str("30"));

	assert!(out.contains(r#"type="number""#), "{}", out);
	assert!(out.contains(r#"min="1""#), "{}", out);
	assert!(out.contains(r#"max="365""#), "{}", out);
	assert!(!out.contains("step="), "{}", out);
}

#[test]
fn test_checkbox_sentinel_precedes_checkbox() {
	let field = FieldDescriptor::builder("enable", FieldKind::Checkbox)
		.label("Enable")
		.description("Turn it on")
		.build()
		.unwrap();
	let out = render(&field, &OptionValue::str("on"));

	let sentinel = out
		.find(r#"<input type="hidden" name="general[enable]" value="off"/>"#)
		.expect("sentinel missing");
	let checkbox = out.find(r#"type="checkbox""#).expect("checkbox missing");
	assert!(sentinel < checkbox, "Sentinel must come before the checkbox: {}", out);
	assert!(out.contains(r#"checked="checked""#), "{}", out);

	let out = render(&field, &OptionValue::str("off"));
	assert!(!out.contains("checked"), "{}", out);
}

#[test]
fn test_multicheck_selected_first_order() {
	let field = FieldDescriptor::builder("parts", FieldKind::Multicheck)
		.label("Parts")
		.option("a", "Alpha")
		.option("b", "Beta")
		.option("c", "Gamma")
		.build()
		.unwrap();
	let out = render(&field, &OptionValue::Seq(vec!["b".into()]));

	// Empty sentinel under the sequence name
	assert!(out.contains(r#"<input type="hidden" name="general[parts][]" value=""/>"#), "{}", out);

	// Selected option first, then the rest in declared order
	let pos_a = out.find(r#"value="a""#).expect("a missing");
	let pos_b = out.find(r#"value="b""#).expect("b missing");
	let pos_c = out.find(r#"value="c""#).expect("c missing");
	assert!(pos_b < pos_a && pos_a < pos_c, "Expected order b, a, c: {}", out);

	// Only the stored key is checked, with a per-option id
	assert_eq!(out.matches(r#"checked="checked""#).count(), 1, "{}", out);
	assert!(out.contains(r#"id="general_parts_b""#), "{}", out);
}

#[test]
fn test_multiselect_selected_first_with_sentinel() {
	let field = FieldDescriptor::builder("langs", FieldKind::Multiselect)
		.label("Languages")
		.option("de", "German")
		.option("en", "English")
		.option("hu", "Hungarian")
		.build()
		.unwrap();
	let out = render(&field, &OptionValue::Seq(vec!["hu".into(), "de".into()]));

	assert!(out.contains(r#"<input type="hidden" name="general[langs][]" value=""/>"#), "{}", out);
	assert!(out.contains(r#"<select multiple"#), "{}", out);
	assert!(out.contains(r#"name="general[langs][]""#), "{}", out);

	let pos_de = out.find(r#"value="de""#).expect("de missing");
	let pos_en = out.find(r#"value="en""#).expect("en missing");
	let pos_hu = out.find(r#"value="hu""#).expect("hu missing");
	assert!(pos_hu < pos_de && pos_de < pos_en, "Expected order hu, de, en: {}", out);
	assert_eq!(out.matches(r#"selected="selected""#).count(), 2, "{}", out);
}

#[test]
fn test_select_marks_current_value() {
	let field = FieldDescriptor::builder("mailer", FieldKind::Select)
		.label("Mailer")
		.option("default", "Default")
		.option("smtp", "SMTP")
		.build()
		.unwrap();
	let out = render(&field, &OptionValue::str("smtp"));

	assert!(out.contains(r#"<option value="smtp" selected="selected">SMTP</option>"#), "{}", out);
	assert!(out.contains(r#"<option value="default">Default</option>"#), "{}", out);
}

#[test]
fn test_unknown_kind_fails_closed() {
	let field = FieldDescriptor::builder("title", FieldKind::Text).label("Title").build().unwrap();
	let renderers = Renderers::empty();
	let ctx = RenderContext { section: "general", field: &field };
	let mut out = String::new();

	let err = renderers.render_field(&mut out, &ctx, &OptionValue::str("")).unwrap_err();
	assert!(matches!(err, Error::UnknownFieldKind(kind) if kind == "text"));
	assert!(out.is_empty(), "Nothing may be written on failure");
}

#[test]
fn test_repeat_renders_indexed_instances() {
	let field = FieldDescriptor::builder("hosts", FieldKind::Repeat)
		.label("Hosts")
		.allow_new(true)
		.field(FieldDescriptor::builder("host", FieldKind::Text).label("Host").build().unwrap())
		.field(
			FieldDescriptor::builder("port", FieldKind::Number)
				.label("Port")
				.default(OptionValue::str("587"))
				.build()
				.unwrap(),
		)
		.build()
		.unwrap();

	let mut instances = Vec::new();
	for host in ["a.example.com", "b.example.com", "c.example.com"] {
		let mut instance = FieldValues::new();
		instance.insert("host".into(), OptionValue::str(host));
		instances.push(instance);
	}
	let out = render(&field, &OptionValue::Items(instances));

	// One heading per instance, one row per nested field
	for i in 1..=3 {
		assert!(out.contains(&format!("Hosts #{}", i)), "{}", out);
	}
	assert_eq!(out.matches(r#"<tr class="repeat-field-row">"#).count(), 6, "{}", out);

	// Index-namespaced input names and folded ids
	assert!(out.contains(r#"name="general[hosts][0][host]""#), "{}", out);
	assert!(out.contains(r#"name="general[hosts][2][port]""#), "{}", out);
	assert!(out.contains(r#"id="general_hosts_0_host""#), "{}", out);
	assert!(out.contains(r#"value="b.example.com""#), "{}", out);

	// Absent nested value falls back to the nested default
	assert_eq!(out.matches(r#"value="587""#).count(), 3, "{}", out);

	// Add control carries the next free index
	assert!(out.contains(r#"data-index="3""#), "{}", out);
}

#[test]
fn test_navigation_marks_first_tab_active() {
	let mut registry = SettingsRegistry::new();
	registry.add_section(SectionDescriptor::new("general", "General")).unwrap();
	registry.add_section(SectionDescriptor::new("email", "Email")).unwrap();
	let registry = registry.freeze();

	let mut out = String::new();
	registry.render_navigation(&mut out).unwrap();

	assert!(out.contains(r##"href="#general" class="nav-tab nav-tab-active""##), "{}", out);
	assert!(out.contains(r##"href="#email" class="nav-tab""##), "{}", out);
}

#[test]
fn test_registry_render_field_uses_default_when_absent() {
	let mut registry = SettingsRegistry::new();
	registry.add_section(SectionDescriptor::new("general", "General")).unwrap();
	registry
		.add_field(
			"general",
			FieldDescriptor::builder("days", FieldKind::Number)
				.label("Days")
				.default(OptionValue::str("30"))
				.build()
				.unwrap(),
		)
		.unwrap();
	let registry = registry.freeze();

	let renderers = Renderers::standard();
	let mut out = String::new();
	registry
		.render_field(&mut out, &renderers, "general", "days", &FieldValues::new())
		.unwrap();
	assert!(out.contains(r#"value="30""#), "{}", out);
}

// vim: ts=4
