//! Email log storage adapter interface
//!
//! Every outgoing mail attempt is recorded as one log entry. Entries are
//! immutable apart from their delivery status, which the failure hook may
//! flip after the fact.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::MlResult;
use crate::types::{LogId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogStatus {
	#[serde(rename = "sent")]
	Sent,
	#[serde(rename = "failed")]
	Failed,
}

impl LogStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			LogStatus::Sent => "sent",
			LogStatus::Failed => "failed",
		}
	}
}

/// A mail attempt about to be recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmailLog {
	pub to: Vec<String>,
	pub subject: String,
	pub body: String,
	pub headers: Vec<(String, String)>,
	/// Stored attachment file names
	pub attachments: Vec<String>,
	/// Originating component (e.g. "password-reset", "test-mail")
	pub source: String,
	pub status: LogStatus,
}

/// A recorded mail attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailLogEntry {
	pub log_id: LogId,
	pub to: Vec<String>,
	pub subject: String,
	pub body: String,
	pub headers: Vec<(String, String)>,
	pub attachments: Vec<String>,
	pub source: String,
	pub status: LogStatus,
	pub error: Option<String>,
	pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub struct ListLogOptions {
	pub status: Option<LogStatus>,
	/// Substring match against subject and recipients
	pub search: Option<String>,
	pub limit: Option<u32>,
	pub offset: Option<u32>,
}

#[async_trait]
pub trait LogAdapter: Send + Sync {
	async fn create_log(&self, log: &NewEmailLog) -> MlResult<LogId>;
	async fn update_log_status(
		&self,
		log_id: LogId,
		status: LogStatus,
		error: Option<&str>,
	) -> MlResult<()>;
	async fn read_log(&self, log_id: LogId) -> MlResult<EmailLogEntry>;
	async fn list_logs(&self, opts: &ListLogOptions) -> MlResult<Vec<EmailLogEntry>>;
	async fn delete_log(&self, log_id: LogId) -> MlResult<()>;
	/// Delete entries created before the cutoff, returns the number removed
	async fn delete_logs_before(&self, cutoff: Timestamp) -> MlResult<u64>;
	async fn delete_all_logs(&self) -> MlResult<u64>;
	async fn count_logs(&self) -> MlResult<u64>;
}

// vim: ts=4
