//! Option key-value store management
//!
//! Each settings section is persisted as one row holding the whole
//! field mapping as a JSON value.

use sqlx::{Row, SqlitePool};

use maillog::prelude::*;
use maillog::types::FieldValues;

/// Read one section mapping by name
pub(crate) async fn read(db: &SqlitePool, name: &str) -> MlResult<Option<FieldValues>> {
	let row = sqlx::query("SELECT value FROM options WHERE name = ?")
		.bind(name)
		.fetch_optional(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	match row {
		Some(row) => {
			let value: Option<String> = row.get("value");
			match value {
				Some(json) => {
					let values = serde_json::from_str(&json)
						.inspect_err(|err| warn!("Corrupt option '{}': {:#?}", name, err))
						.map_err(|_| Error::DbError)?;
					Ok(Some(values))
				}
				None => Ok(Some(FieldValues::new())),
			}
		}
		None => Ok(None),
	}
}

/// Create a section mapping; fails if the name already exists
pub(crate) async fn create(db: &SqlitePool, name: &str, values: &FieldValues) -> MlResult<()> {
	let json = serde_json::to_string(values).map_err(|_| Error::DbError)?;
	sqlx::query("INSERT INTO options (name, value) VALUES (?, ?)")
		.bind(name)
		.bind(json)
		.execute(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;
	Ok(())
}

/// Update or create a section mapping
pub(crate) async fn write(db: &SqlitePool, name: &str, values: &FieldValues) -> MlResult<()> {
	let json = serde_json::to_string(values).map_err(|_| Error::DbError)?;
	sqlx::query("INSERT OR REPLACE INTO options (name, value) VALUES (?, ?)")
		.bind(name)
		.bind(json)
		.execute(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;
	Ok(())
}

// vim: ts=4
