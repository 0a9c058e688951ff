//! Email log row management
//!
//! Recipients, headers and attachment names are stored as JSON columns;
//! status is stored as its wire string ("sent"/"failed").

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use maillog::log_adapter::{EmailLogEntry, ListLogOptions, LogStatus, NewEmailLog};
use maillog::prelude::*;

fn status_from_str(s: &str) -> MlResult<LogStatus> {
	match s {
		"sent" => Ok(LogStatus::Sent),
		"failed" => Ok(LogStatus::Failed),
		_ => {
			warn!("Unknown log status in database: {}", s);
			Err(Error::DbError)
		}
	}
}

fn map_row(row: &SqliteRow) -> MlResult<EmailLogEntry> {
	let to_json: String = row.get("to_addr");
	let headers_json: Option<String> = row.get("headers");
	let attachments_json: Option<String> = row.get("attachments");
	let status: String = row.get("status");

	Ok(EmailLogEntry {
		log_id: row.get("log_id"),
		to: serde_json::from_str(&to_json)
			.inspect_err(|err| warn!("Corrupt recipient list: {:#?}", err))
			.map_err(|_| Error::DbError)?,
		subject: row.get("subject"),
		body: row.get::<Option<String>, _>("body").unwrap_or_default(),
		headers: headers_json
			.as_deref()
			.map(serde_json::from_str)
			.transpose()
			.inspect_err(|err| warn!("Corrupt header list: {:#?}", err))
			.map_err(|_| Error::DbError)?
			.unwrap_or_default(),
		attachments: attachments_json
			.as_deref()
			.map(serde_json::from_str)
			.transpose()
			.inspect_err(|err| warn!("Corrupt attachment list: {:#?}", err))
			.map_err(|_| Error::DbError)?
			.unwrap_or_default(),
		source: row.get::<Option<String>, _>("source").unwrap_or_default(),
		status: status_from_str(&status)?,
		error: row.get("error"),
		created_at: Timestamp(row.get("created_at")),
	})
}

pub(crate) async fn create(db: &SqlitePool, log: &NewEmailLog) -> MlResult<LogId> {
	let to = serde_json::to_string(&log.to).map_err(|_| Error::DbError)?;
	let headers = serde_json::to_string(&log.headers).map_err(|_| Error::DbError)?;
	let attachments = serde_json::to_string(&log.attachments).map_err(|_| Error::DbError)?;

	let row = sqlx::query(
		"INSERT INTO email_log (to_addr, subject, body, headers, attachments, source, status)
		VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING log_id",
	)
	.bind(to)
	.bind(&log.subject)
	.bind(&log.body)
	.bind(headers)
	.bind(attachments)
	.bind(&log.source)
	.bind(log.status.as_str())
	.fetch_one(db)
	.await
	.inspect_err(|err| warn!("DB: {:#?}", err))
	.map_err(|_| Error::DbError)?;

	Ok(row.get("log_id"))
}

pub(crate) async fn update_status(
	db: &SqlitePool,
	log_id: LogId,
	status: LogStatus,
	error: Option<&str>,
) -> MlResult<()> {
	let res = sqlx::query("UPDATE email_log SET status = ?, error = ? WHERE log_id = ?")
		.bind(status.as_str())
		.bind(error)
		.bind(log_id)
		.execute(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

pub(crate) async fn read(db: &SqlitePool, log_id: LogId) -> MlResult<EmailLogEntry> {
	let row = sqlx::query(
		"SELECT log_id, to_addr, subject, body, headers, attachments, source, status, error, created_at
		FROM email_log WHERE log_id = ?",
	)
	.bind(log_id)
	.fetch_optional(db)
	.await
	.inspect_err(|err| warn!("DB: {:#?}", err))
	.map_err(|_| Error::DbError)?;

	match row {
		Some(row) => map_row(&row),
		None => Err(Error::NotFound),
	}
}

pub(crate) async fn list(db: &SqlitePool, opts: &ListLogOptions) -> MlResult<Vec<EmailLogEntry>> {
	let mut query = sqlx::QueryBuilder::new(
		"SELECT log_id, to_addr, subject, body, headers, attachments, source, status, error, created_at
		FROM email_log WHERE 1=1",
	);
	if let Some(status) = opts.status {
		query.push(" AND status = ").push_bind(status.as_str());
	}
	if let Some(search) = &opts.search {
		let pattern = format!("%{}%", search);
		query.push(" AND (subject LIKE ").push_bind(pattern.clone());
		query.push(" OR to_addr LIKE ").push_bind(pattern);
		query.push(")");
	}
	query.push(" ORDER BY log_id DESC");
	if let Some(limit) = opts.limit {
		query.push(" LIMIT ").push_bind(limit);
		if let Some(offset) = opts.offset {
			query.push(" OFFSET ").push_bind(offset);
		}
	}

	let rows = query
		.build()
		.fetch_all(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	let mut entries = Vec::with_capacity(rows.len());
	for row in &rows {
		entries.push(map_row(row)?);
	}
	Ok(entries)
}

pub(crate) async fn delete(db: &SqlitePool, log_id: LogId) -> MlResult<()> {
	let res = sqlx::query("DELETE FROM email_log WHERE log_id = ?")
		.bind(log_id)
		.execute(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

pub(crate) async fn delete_before(db: &SqlitePool, cutoff: Timestamp) -> MlResult<u64> {
	let res = sqlx::query("DELETE FROM email_log WHERE created_at < ?")
		.bind(cutoff.0)
		.execute(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	Ok(res.rows_affected())
}

pub(crate) async fn delete_all(db: &SqlitePool) -> MlResult<u64> {
	let res = sqlx::query("DELETE FROM email_log")
		.execute(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	Ok(res.rows_affected())
}

pub(crate) async fn count(db: &SqlitePool) -> MlResult<u64> {
	let row = sqlx::query("SELECT COUNT(*) AS cnt FROM email_log")
		.fetch_one(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	let cnt: i64 = row.get("cnt");
	Ok(cnt as u64)
}

// vim: ts=4
