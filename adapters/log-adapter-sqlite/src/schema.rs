//! Database schema initialization

use sqlx::SqlitePool;

/// Initialize the database schema
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Email log
	//***********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS email_log (
		log_id integer PRIMARY KEY AUTOINCREMENT,
		to_addr json NOT NULL,
		subject text NOT NULL,
		body text,
		headers json,
		attachments json,
		source text,
		status text NOT NULL,
		error text,
		created_at datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query("CREATE INDEX IF NOT EXISTS idx_email_log_created_at ON email_log (created_at)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_email_log_status ON email_log (status)")
		.execute(&mut *tx)
		.await?;

	tx.commit().await?;
	Ok(())
}

// vim: ts=4
