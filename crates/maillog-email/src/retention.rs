//! Periodic log retention sweep
//!
//! Deletes log entries older than the configured retention window.
//! Meant to be driven by an external scheduler (cron, systemd timer,
//! or an in-process interval task).

use std::sync::Arc;

use maillog_settings::FrozenSettingsRegistry;

use crate::prelude::*;
use crate::settings::GENERAL_SECTION;

const DEFAULT_RETENTION_DAYS: i64 = 30;

pub struct RetentionSweep {
	registry: Arc<FrozenSettingsRegistry>,
	store: Arc<dyn OptionAdapter>,
	log: Arc<dyn LogAdapter>,
}

impl RetentionSweep {
	pub fn new(
		registry: Arc<FrozenSettingsRegistry>,
		store: Arc<dyn OptionAdapter>,
		log: Arc<dyn LogAdapter>,
	) -> Self {
		Self { registry, store, log }
	}

	/// Run one sweep, returns the number of entries deleted.
	///
	/// No-op unless the `delete_old_log` setting is enabled. An
	/// unparsable `log_save_days` falls back to the default window.
	pub async fn run(&self) -> MlResult<u64> {
		let enabled =
			self.registry.read_value(&*self.store, GENERAL_SECTION, "delete_old_log").await?;
		if enabled.as_str() != Some("on") {
			debug!("Log retention disabled, skipping sweep");
			return Ok(0);
		}

		let days = self
			.registry
			.read_value(&*self.store, GENERAL_SECTION, "log_save_days")
			.await?
			.as_str()
			.and_then(|s| s.parse::<i64>().ok())
			.filter(|days| *days > 0)
			.unwrap_or(DEFAULT_RETENTION_DAYS);

		let cutoff = cutoff_timestamp(Timestamp::now(), days);
		let deleted = self.log.delete_logs_before(cutoff).await?;
		if deleted > 0 {
			info!("Retention sweep deleted {} log entries older than {} days", deleted, days);
		}
		Ok(deleted)
	}
}

/// Entries strictly older than `now - days` are swept
pub(crate) fn cutoff_timestamp(now: Timestamp, days: i64) -> Timestamp {
	Timestamp(now.0 - days * 86_400)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_cutoff_timestamp() {
		let now = Timestamp(1_000_000);
		assert_eq!(cutoff_timestamp(now, 1), Timestamp(1_000_000 - 86_400));
		assert_eq!(cutoff_timestamp(now, 30), Timestamp(1_000_000 - 30 * 86_400));
	}
}

// vim: ts=4
