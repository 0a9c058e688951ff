//! SQLite-backed email log store

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};

use maillog::log_adapter::{EmailLogEntry, ListLogOptions, LogAdapter, LogStatus, NewEmailLog};
use maillog::prelude::*;

mod log;
mod schema;

use schema::init_db;

#[derive(Debug)]
pub struct LogAdapterSqlite {
	db: SqlitePool,
}

impl LogAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> MlResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| warn!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		init_db(&db).await.inspect_err(|err| warn!("DbError: {:#?}", err)).or(Err(Error::DbError))?;

		Ok(Self { db })
	}
}

#[async_trait]
impl LogAdapter for LogAdapterSqlite {
	async fn create_log(&self, log: &NewEmailLog) -> MlResult<LogId> {
		log::create(&self.db, log).await
	}

	async fn update_log_status(
		&self,
		log_id: LogId,
		status: LogStatus,
		error: Option<&str>,
	) -> MlResult<()> {
		log::update_status(&self.db, log_id, status, error).await
	}

	async fn read_log(&self, log_id: LogId) -> MlResult<EmailLogEntry> {
		log::read(&self.db, log_id).await
	}

	async fn list_logs(&self, opts: &ListLogOptions) -> MlResult<Vec<EmailLogEntry>> {
		log::list(&self.db, opts).await
	}

	async fn delete_log(&self, log_id: LogId) -> MlResult<()> {
		log::delete(&self.db, log_id).await
	}

	async fn delete_logs_before(&self, cutoff: Timestamp) -> MlResult<u64> {
		log::delete_before(&self.db, cutoff).await
	}

	async fn delete_all_logs(&self) -> MlResult<u64> {
		log::delete_all(&self.db).await
	}

	async fn count_logs(&self) -> MlResult<u64> {
		log::count(&self.db).await
	}
}

// vim: ts=4
