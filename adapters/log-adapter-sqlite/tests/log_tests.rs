//! Email log adapter CRUD and retention tests

use maillog::log_adapter::{ListLogOptions, LogAdapter, LogStatus, NewEmailLog};
use maillog::types::Timestamp;
use maillog_log_adapter_sqlite::LogAdapterSqlite;
use tempfile::TempDir;

async fn create_test_adapter() -> (LogAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter = LogAdapterSqlite::new(temp_dir.path().join("log.db"))
		.await
		.expect("Failed to create adapter");

	(adapter, temp_dir)
}

fn sample_log(to: &str, subject: &str) -> NewEmailLog {
	NewEmailLog {
		to: vec![to.to_string()],
		subject: subject.to_string(),
		body: "Hello".to_string(),
		headers: vec![("X-Mailer".to_string(), "maillog".to_string())],
		attachments: vec!["report.pdf".to_string()],
		source: "test-mail".to_string(),
		status: LogStatus::Sent,
	}
}

#[tokio::test]
async fn test_create_and_read_log() {
	let (adapter, _temp) = create_test_adapter().await;

	let log_id = adapter
		.create_log(&sample_log("alice@example.com", "Welcome"))
		.await
		.expect("Should create log");

	let entry = adapter.read_log(log_id).await.expect("Should read log back");
	assert_eq!(entry.log_id, log_id);
	assert_eq!(entry.to, vec!["alice@example.com".to_string()]);
	assert_eq!(entry.subject, "Welcome");
	assert_eq!(entry.headers, vec![("X-Mailer".to_string(), "maillog".to_string())]);
	assert_eq!(entry.attachments, vec!["report.pdf".to_string()]);
	assert_eq!(entry.status, LogStatus::Sent);
	assert!(entry.error.is_none());
}

#[tokio::test]
async fn test_read_missing_log() {
	let (adapter, _temp) = create_test_adapter().await;

	let result = adapter.read_log(42).await;
	assert!(result.is_err(), "Reading a missing log should fail");
}

#[tokio::test]
async fn test_update_log_status() {
	let (adapter, _temp) = create_test_adapter().await;

	let log_id = adapter
		.create_log(&sample_log("bob@example.com", "Reset"))
		.await
		.expect("Should create log");

	adapter
		.update_log_status(log_id, LogStatus::Failed, Some("connection refused"))
		.await
		.expect("Should update status");

	let entry = adapter.read_log(log_id).await.expect("Should read log back");
	assert_eq!(entry.status, LogStatus::Failed);
	assert_eq!(entry.error.as_deref(), Some("connection refused"));
}

#[tokio::test]
async fn test_list_logs_filtered() {
	let (adapter, _temp) = create_test_adapter().await;

	let first = adapter
		.create_log(&sample_log("alice@example.com", "Welcome"))
		.await
		.expect("Should create log");
	adapter
		.create_log(&sample_log("bob@example.com", "Password reset"))
		.await
		.expect("Should create log");
	adapter.update_log_status(first, LogStatus::Failed, Some("timeout")).await.expect("update");

	let failed = adapter
		.list_logs(&ListLogOptions { status: Some(LogStatus::Failed), ..Default::default() })
		.await
		.expect("Should list logs");
	assert_eq!(failed.len(), 1);
	assert_eq!(failed[0].log_id, first);

	let matching = adapter
		.list_logs(&ListLogOptions { search: Some("reset".into()), ..Default::default() })
		.await
		.expect("Should list logs");
	assert_eq!(matching.len(), 1);
	assert_eq!(matching[0].subject, "Password reset");
}

#[tokio::test]
async fn test_list_logs_newest_first_with_limit() {
	let (adapter, _temp) = create_test_adapter().await;

	for i in 1..=5 {
		adapter
			.create_log(&sample_log("user@example.com", &format!("Mail {}", i)))
			.await
			.expect("Should create log");
	}

	let page = adapter
		.list_logs(&ListLogOptions { limit: Some(2), offset: Some(0), ..Default::default() })
		.await
		.expect("Should list logs");
	assert_eq!(page.len(), 2);
	assert_eq!(page[0].subject, "Mail 5");
	assert_eq!(page[1].subject, "Mail 4");
}

#[tokio::test]
async fn test_delete_log() {
	let (adapter, _temp) = create_test_adapter().await;

	let log_id = adapter
		.create_log(&sample_log("alice@example.com", "Welcome"))
		.await
		.expect("Should create log");

	adapter.delete_log(log_id).await.expect("Should delete log");
	assert!(adapter.read_log(log_id).await.is_err());
	assert!(adapter.delete_log(log_id).await.is_err(), "Double delete should fail");
}

#[tokio::test]
async fn test_delete_logs_before_cutoff() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.create_log(&sample_log("alice@example.com", "Recent"))
		.await
		.expect("Should create log");

	// Everything was created just now, so a past cutoff removes nothing
	let removed = adapter
		.delete_logs_before(Timestamp(0))
		.await
		.expect("Should run retention delete");
	assert_eq!(removed, 0);
	assert_eq!(adapter.count_logs().await.expect("count"), 1);

	// A future cutoff removes everything
	let removed = adapter
		.delete_logs_before(Timestamp(i64::MAX))
		.await
		.expect("Should run retention delete");
	assert_eq!(removed, 1);
	assert_eq!(adapter.count_logs().await.expect("count"), 0);
}

#[tokio::test]
async fn test_delete_all_logs() {
	let (adapter, _temp) = create_test_adapter().await;

	for i in 1..=3 {
		adapter
			.create_log(&sample_log("user@example.com", &format!("Mail {}", i)))
			.await
			.expect("Should create log");
	}

	let removed = adapter.delete_all_logs().await.expect("Should delete all");
	assert_eq!(removed, 3);
	assert_eq!(adapter.count_logs().await.expect("count"), 0);
}

// vim: ts=4
