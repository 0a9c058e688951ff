//! Option adapter CRUD tests

use maillog::option_adapter::OptionAdapter;
use maillog::types::{FieldValues, OptionValue};
use maillog_option_adapter_sqlite::OptionAdapterSqlite;
use tempfile::TempDir;

async fn create_test_adapter() -> (OptionAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter = OptionAdapterSqlite::new(temp_dir.path().join("options.db"))
		.await
		.expect("Failed to create adapter");

	(adapter, temp_dir)
}

fn sample_values() -> FieldValues {
	let mut values = FieldValues::new();
	values.insert("email_log_enable".into(), OptionValue::str("on"));
	values.insert("log_save_days".into(), OptionValue::str("30"));
	values.insert(
		"store_parts".into(),
		OptionValue::Seq(vec!["body".into(), "headers".into()]),
	);
	values
}

#[tokio::test]
async fn test_read_missing_section() {
	let (adapter, _temp) = create_test_adapter().await;

	let result = adapter.read_option("maillog_general").await.expect("Read should succeed");
	assert!(result.is_none(), "Missing section should read as None");
}

#[tokio::test]
async fn test_create_and_read_section() {
	let (adapter, _temp) = create_test_adapter().await;
	let values = sample_values();

	adapter.create_option("maillog_general", &values).await.expect("Should create section");

	let stored = adapter
		.read_option("maillog_general")
		.await
		.expect("Read should succeed")
		.expect("Section should exist");
	assert_eq!(stored, values);
}

#[tokio::test]
async fn test_create_existing_section_fails() {
	let (adapter, _temp) = create_test_adapter().await;
	let values = sample_values();

	adapter.create_option("maillog_general", &values).await.expect("Should create section");

	let result = adapter.create_option("maillog_general", &values).await;
	assert!(result.is_err(), "Creating an existing section should fail");
}

#[tokio::test]
async fn test_write_overwrites() {
	let (adapter, _temp) = create_test_adapter().await;
	let mut values = sample_values();

	adapter.create_option("maillog_general", &values).await.expect("Should create section");

	values.insert("log_save_days".into(), OptionValue::str("90"));
	adapter.write_option("maillog_general", &values).await.expect("Should overwrite section");

	let stored = adapter
		.read_option("maillog_general")
		.await
		.expect("Read should succeed")
		.expect("Section should exist");
	assert_eq!(stored.get("log_save_days"), Some(&OptionValue::str("90")));
}

#[tokio::test]
async fn test_write_creates_missing_section() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.write_option("maillog_email", &sample_values())
		.await
		.expect("Write should create the section");

	let stored = adapter.read_option("maillog_email").await.expect("Read should succeed");
	assert!(stored.is_some());
}

#[tokio::test]
async fn test_group_values_round_trip() {
	let (adapter, _temp) = create_test_adapter().await;

	let mut host = FieldValues::new();
	host.insert("host".into(), OptionValue::str("smtp.example.com"));
	host.insert("port".into(), OptionValue::str("587"));

	let mut values = FieldValues::new();
	values.insert("smtp_hosts".into(), OptionValue::Items(vec![host]));

	adapter.create_option("maillog_email", &values).await.expect("Should create section");

	let stored = adapter
		.read_option("maillog_email")
		.await
		.expect("Read should succeed")
		.expect("Section should exist");
	let items = stored.get("smtp_hosts").and_then(|v| v.as_items()).expect("Should be a group");
	assert_eq!(items.len(), 1);
	assert_eq!(items[0].get("host"), Some(&OptionValue::str("smtp.example.com")));
}

// vim: ts=4
