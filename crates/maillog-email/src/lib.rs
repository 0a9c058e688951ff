//! Email capture, logging and delivery
//!
//! This module provides:
//! - Logging of every outgoing mail attempt via a pluggable log adapter
//! - SMTP delivery with lettre, driven by the settings store
//! - Sender identity and SMTP host overrides
//! - Retention sweep deleting old log entries
//! - Settings declarations for the above, registered into the shared
//!   settings registry

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod logger;
pub mod retention;
pub mod sender;
pub mod settings;

pub use logger::MailLogger;
pub use retention::RetentionSweep;
pub use sender::{FromOverride, MailSender, SmtpOverride, SmtpTls};
pub use settings::{register_settings, EMAIL_SECTION, GENERAL_SECTION};

mod prelude;

use serde::{Deserialize, Serialize};

/// One outgoing mail about to be logged and delivered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingMail {
	pub to: Vec<String>,
	pub subject: String,
	pub body: String,
	/// Extra headers, kept for the log record
	#[serde(default)]
	pub headers: Vec<(String, String)>,
	/// Attachment file names, kept for the log record
	#[serde(default)]
	pub attachments: Vec<String>,
	/// Originating component (e.g. "password-reset", "test-mail")
	pub source: String,
	/// Default sender mailbox, used unless the override setting is on
	#[serde(default)]
	pub from: Option<String>,
}

// vim: ts=4
