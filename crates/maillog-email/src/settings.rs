//! Settings declarations for the email subsystem
//!
//! Two sections: `maillog_general` controls capture and retention,
//! `maillog_email` controls sender identity and SMTP delivery.

use maillog_settings::{FieldDescriptor, FieldKind, SectionDescriptor, SettingsRegistry};

use crate::prelude::*;

pub const GENERAL_SECTION: &str = "maillog_general";
pub const EMAIL_SECTION: &str = "maillog_email";

/// Register the email subsystem's sections and fields
pub fn register_settings(registry: &mut SettingsRegistry) -> MlResult<()> {
	register_general(registry)?;
	register_email(registry)?;
	Ok(())
}

fn register_general(registry: &mut SettingsRegistry) -> MlResult<()> {
	registry.add_section(
		SectionDescriptor::new(GENERAL_SECTION, "General")
			.description("Email capture and retention"),
	)?;

	registry.add_field(
		GENERAL_SECTION,
		FieldDescriptor::builder("email_log_enable", FieldKind::Checkbox)
			.label("Log emails")
			.description("Record every outgoing email in the log")
			.default(OptionValue::str("on"))
			.build()?,
	)?;
	registry.add_field(
		GENERAL_SECTION,
		FieldDescriptor::builder("store_parts", FieldKind::Multicheck)
			.label("Store parts")
			.description("Which parts of each email to keep in the log")
			.option("body", "Body")
			.option("headers", "Headers")
			.option("attachments", "Attachment names")
			.default(OptionValue::Seq(vec![
				"body".into(),
				"headers".into(),
				"attachments".into(),
			]))
			.build()?,
	)?;
	registry.add_field(
		GENERAL_SECTION,
		FieldDescriptor::builder("delete_old_log", FieldKind::Checkbox)
			.label("Delete old logs")
			.description("Periodically delete log entries older than the retention window")
			.default(OptionValue::str("off"))
			.build()?,
	)?;
	registry.add_field(
		GENERAL_SECTION,
		FieldDescriptor::builder("log_save_days", FieldKind::Number)
			.label("Retention days")
			.description("Log entries older than this many days are deleted")
			.default(OptionValue::str("30"))
			.min("1")
			.max("365")
			.build()?,
	)?;

	Ok(())
}

fn register_email(registry: &mut SettingsRegistry) -> MlResult<()> {
	registry.add_section(
		SectionDescriptor::new(EMAIL_SECTION, "Email")
			.description("Sender identity and delivery"),
	)?;

	registry.add_field(
		EMAIL_SECTION,
		FieldDescriptor::builder("email_override", FieldKind::Checkbox)
			.label("Override sender")
			.description("Replace the default sender name and address")
			.default(OptionValue::str("off"))
			.build()?,
	)?;
	registry.add_field(
		EMAIL_SECTION,
		FieldDescriptor::builder("from_name", FieldKind::Text)
			.label("From name")
			.sanitize(trim_value)
			.build()?,
	)?;
	registry.add_field(
		EMAIL_SECTION,
		FieldDescriptor::builder("from_email", FieldKind::Text)
			.label("From email")
			.placeholder("sender@example.com")
			.sanitize(trim_value)
			.build()?,
	)?;
	registry.add_field(
		EMAIL_SECTION,
		FieldDescriptor::builder("mailer", FieldKind::Select)
			.label("Mailer")
			.description("How outgoing email is delivered")
			.option("default", "System default")
			.option("smtp", "SMTP")
			.default(OptionValue::str("default"))
			.build()?,
	)?;
	registry.add_field(EMAIL_SECTION, smtp_hosts_field()?)?;

	Ok(())
}

fn smtp_hosts_field() -> MlResult<FieldDescriptor> {
	let mut instance = FieldValues::new();
	instance.insert("host".into(), OptionValue::str(""));
	instance.insert("port".into(), OptionValue::str("587"));
	instance.insert("tls".into(), OptionValue::str("starttls"));
	instance.insert("username".into(), OptionValue::str(""));
	instance.insert("password".into(), OptionValue::str(""));

	FieldDescriptor::builder("smtp_hosts", FieldKind::Repeat)
		.label("SMTP hosts")
		.description("Delivery hosts, tried in order")
		.sortable(true)
		.allow_new(true)
		.default(OptionValue::Items(vec![instance]))
		.field(
			FieldDescriptor::builder("host", FieldKind::Text)
				.label("Host")
				.placeholder("smtp.example.com")
				.sanitize(trim_value)
				.build()?,
		)
		.field(
			FieldDescriptor::builder("port", FieldKind::Number)
				.label("Port")
				.default(OptionValue::str("587"))
				.min("1")
				.max("65535")
				.build()?,
		)
		.field(
			FieldDescriptor::builder("tls", FieldKind::Select)
				.label("Encryption")
				.option("none", "None")
				.option("starttls", "STARTTLS")
				.option("tls", "TLS")
				.default(OptionValue::str("starttls"))
				.build()?,
		)
		.field(FieldDescriptor::builder("username", FieldKind::Text).label("Username").build()?)
		.field(
			FieldDescriptor::builder("password", FieldKind::Password).label("Password").build()?,
		)
		.build()
}

fn trim_value(value: &OptionValue) -> OptionValue {
	match value.as_str() {
		Some(s) => OptionValue::str(s.trim()),
		None => value.clone(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_register_settings() {
		let mut registry = SettingsRegistry::new();
		register_settings(&mut registry).unwrap();

		let registry = registry.freeze();
		assert_eq!(registry.sections().len(), 2);
		assert!(registry.field(GENERAL_SECTION, "email_log_enable").is_some());
		assert!(registry.field(EMAIL_SECTION, "smtp_hosts").is_some());

		let smtp = registry.field(EMAIL_SECTION, "smtp_hosts").unwrap();
		assert_eq!(smtp.fields.len(), 5);
		assert!(smtp.allow_new);
	}

	#[test]
	fn test_general_defaults() {
		let mut registry = SettingsRegistry::new();
		register_settings(&mut registry).unwrap();
		let registry = registry.freeze();

		let defaults = registry.default_values(GENERAL_SECTION);
		assert_eq!(defaults.get("email_log_enable"), Some(&OptionValue::str("on")));
		assert_eq!(defaults.get("log_save_days"), Some(&OptionValue::str("30")));
		assert_eq!(
			defaults.get("store_parts"),
			Some(&OptionValue::Seq(vec![
				"body".into(),
				"headers".into(),
				"attachments".into()
			]))
		);
	}

	#[test]
	fn test_trim_sanitizer() {
		let value = OptionValue::str("  admin@example.com  ");
		assert_eq!(trim_value(&value), OptionValue::str("admin@example.com"));
	}
}

// vim: ts=4
