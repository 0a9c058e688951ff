//! Mail attempt logging
//!
//! Records each outgoing mail as a log entry before delivery is
//! attempted, optimistically marked sent; the failure path flips the
//! status afterwards. Which parts of the mail are stored is driven by
//! the `store_parts` setting.

use std::sync::Arc;

use maillog_settings::FrozenSettingsRegistry;

use crate::prelude::*;
use crate::settings::GENERAL_SECTION;
use crate::OutgoingMail;

pub struct MailLogger {
	registry: Arc<FrozenSettingsRegistry>,
	store: Arc<dyn OptionAdapter>,
	log: Arc<dyn LogAdapter>,
}

impl MailLogger {
	pub fn new(
		registry: Arc<FrozenSettingsRegistry>,
		store: Arc<dyn OptionAdapter>,
		log: Arc<dyn LogAdapter>,
	) -> Self {
		Self { registry, store, log }
	}

	pub fn adapter(&self) -> &Arc<dyn LogAdapter> {
		&self.log
	}

	/// Record a mail attempt. Returns `None` when logging is disabled.
	pub async fn record(&self, mail: &OutgoingMail) -> MlResult<Option<LogId>> {
		let enabled =
			self.registry.read_value(&*self.store, GENERAL_SECTION, "email_log_enable").await?;
		if enabled.as_str() != Some("on") {
			debug!("Email logging disabled, skipping log for {:?}", mail.to);
			return Ok(None);
		}

		let parts =
			self.registry.read_value(&*self.store, GENERAL_SECTION, "store_parts").await?;
		let parts = parts.as_seq().unwrap_or(&[]).to_vec();
		let keep = |part: &str| parts.iter().any(|p| p == part);

		let entry = NewEmailLog {
			to: mail.to.clone(),
			subject: mail.subject.clone(),
			body: if keep("body") { mail.body.clone() } else { String::new() },
			headers: if keep("headers") { mail.headers.clone() } else { Vec::new() },
			attachments: if keep("attachments") { mail.attachments.clone() } else { Vec::new() },
			source: mail.source.clone(),
			status: LogStatus::Sent,
		};

		let log_id = self.log.create_log(&entry).await?;
		debug!("Recorded mail attempt {} to {:?}", log_id, mail.to);
		Ok(Some(log_id))
	}

	/// Flip a recorded attempt to failed with the delivery error
	pub async fn mark_failed(&self, log_id: LogId, error: &str) -> MlResult<()> {
		warn!("Mail attempt {} failed: {}", log_id, error);
		self.log.update_log_status(log_id, LogStatus::Failed, Some(error)).await
	}
}

// vim: ts=4
