//! SQLite-backed option store
//!
//! Persists settings section mappings as JSON rows in a single table.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};

use maillog::option_adapter::OptionAdapter;
use maillog::prelude::*;
use maillog::types::FieldValues;

mod option;
mod schema;

use schema::init_db;

#[derive(Debug)]
pub struct OptionAdapterSqlite {
	db: SqlitePool,
}

impl OptionAdapterSqlite {
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
impl OptionAdapter for OptionAdapterSqlite {
	async fn read_option(&self, section_id: &str) -> MlResult<Option<FieldValues>> {
		option::read(&self.db, section_id).await
	}

	async fn create_option(&self, section_id: &str, values: &FieldValues) -> MlResult<()> {
		option::create(&self.db, section_id, values).await
	}

	async fn write_option(&self, section_id: &str, values: &FieldValues) -> MlResult<()> {
		option::write(&self.db, section_id, values).await
	}
}

// vim: ts=4
