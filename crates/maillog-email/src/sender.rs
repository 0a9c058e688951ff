//! SMTP email delivery using lettre
//!
//! Delivery parameters come from the settings store at send time: the
//! `mailer` field selects between the system default relay and the
//! configured SMTP host list, and the sender identity may be replaced
//! by the `email_override` fields. Every attempt is recorded through
//! [`MailLogger`] before delivery.

use std::sync::Arc;
use std::time::Duration;

use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::SmtpTransport;
use lettre::{Message, Transport};
use maillog_settings::FrozenSettingsRegistry;

use crate::logger::MailLogger;
use crate::prelude::*;
use crate::settings::EMAIL_SECTION;
use crate::OutgoingMail;

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpTls {
	None,
	StartTls,
	Tls,
}

impl SmtpTls {
	pub fn from_setting(value: &str) -> MlResult<Self> {
		match value {
			"none" => Ok(SmtpTls::None),
			"starttls" => Ok(SmtpTls::StartTls),
			"tls" => Ok(SmtpTls::Tls),
			_ => Err(Error::ConfigError(format!(
				"Invalid TLS mode: {}. Must be 'none', 'starttls', or 'tls'",
				value
			))),
		}
	}
}

/// Delivery host resolved from the `smtp_hosts` setting
#[derive(Debug, Clone)]
pub struct SmtpOverride {
	pub host: String,
	pub port: u16,
	pub tls: SmtpTls,
	pub username: String,
	pub password: String,
}

impl SmtpOverride {
	/// Resolve the active SMTP override, if the smtp mailer is selected.
	///
	/// The first configured host wins; further entries are kept for
	/// manual failover from the admin page.
	pub async fn resolve(
		registry: &FrozenSettingsRegistry,
		store: &dyn OptionAdapter,
	) -> MlResult<Option<Self>> {
		let mailer = registry.read_value(store, EMAIL_SECTION, "mailer").await?;
		if mailer.as_str() != Some("smtp") {
			return Ok(None);
		}

		let hosts = registry.read_value(store, EMAIL_SECTION, "smtp_hosts").await?;
		let instance = hosts
			.as_items()
			.and_then(|items| items.first())
			.ok_or_else(|| Error::ConfigError("SMTP mailer selected but no host configured".into()))?;

		let get = |name: &str| {
			instance.get(name).and_then(OptionValue::as_str).unwrap_or("").to_string()
		};
		let host = get("host");
		if host.is_empty() {
			return Err(Error::ConfigError("SMTP host is empty".into()));
		}
		let port: u16 = get("port")
			.parse()
			.map_err(|_| Error::ConfigError(format!("Invalid SMTP port: '{}'", get("port"))))?;
		let tls = SmtpTls::from_setting(&get("tls"))?;

		Ok(Some(Self { host, port, tls, username: get("username"), password: get("password") }))
	}
}

/// Sender identity resolved from the `email_override` fields
#[derive(Debug, Clone)]
pub struct FromOverride {
	pub name: String,
	pub address: String,
}

impl FromOverride {
	pub async fn resolve(
		registry: &FrozenSettingsRegistry,
		store: &dyn OptionAdapter,
	) -> MlResult<Option<Self>> {
		let enabled = registry.read_value(store, EMAIL_SECTION, "email_override").await?;
		if enabled.as_str() != Some("on") {
			return Ok(None);
		}

		let name = registry.read_value(store, EMAIL_SECTION, "from_name").await?;
		let address = registry.read_value(store, EMAIL_SECTION, "from_email").await?;
		let address = address.as_str().unwrap_or("").to_string();
		if !address.contains('@') {
			return Err(Error::ConfigError("Sender override enabled without a valid address".into()));
		}

		Ok(Some(Self { name: name.as_str().unwrap_or("").to_string(), address }))
	}

	/// Mailbox form: `Name <addr>` or bare address
	pub fn mailbox(&self) -> String {
		if self.name.is_empty() {
			self.address.clone()
		} else {
			format!("{} <{}>", self.name, self.address)
		}
	}
}

/// Settings-driven SMTP sender
pub struct MailSender {
	registry: Arc<FrozenSettingsRegistry>,
	store: Arc<dyn OptionAdapter>,
	logger: MailLogger,
}

impl MailSender {
	pub fn new(
		registry: Arc<FrozenSettingsRegistry>,
		store: Arc<dyn OptionAdapter>,
		logger: MailLogger,
	) -> Self {
		Self { registry, store, logger }
	}

	/// Record and deliver one mail. Returns the log id, `None` when
	/// logging is disabled.
	pub async fn send(&self, mail: &OutgoingMail) -> MlResult<Option<LogId>> {
		let log_id = self.logger.record(mail).await?;

		if let Err(err) = self.deliver(mail).await {
			if let Some(log_id) = log_id {
				self.logger.mark_failed(log_id, &err.to_string()).await?;
			}
			return Err(err);
		}

		info!("Email sent to {:?}", mail.to);
		Ok(log_id)
	}

	/// Re-deliver a previously recorded mail as a fresh attempt
	pub async fn resend(&self, log_id: LogId) -> MlResult<Option<LogId>> {
		let entry = self.logger.adapter().read_log(log_id).await?;
		let mail = OutgoingMail {
			to: entry.to,
			subject: entry.subject,
			body: entry.body,
			headers: entry.headers,
			attachments: entry.attachments,
			source: "resend".into(),
			from: None,
		};
		self.send(&mail).await
	}

	async fn deliver(&self, mail: &OutgoingMail) -> MlResult<()> {
		let from_override = FromOverride::resolve(&self.registry, &*self.store).await?;
		let from = match (&from_override, &mail.from) {
			(Some(over), _) => over.mailbox(),
			(None, Some(from)) => from.clone(),
			(None, None) => {
				return Err(Error::ConfigError("No sender address configured".into()));
			}
		};

		let mut builder = Message::builder()
			.from(
				from.parse()
					.map_err(|_| Error::ValidationError(format!("Invalid sender: {}", from)))?,
			)
			.subject(&mail.subject);
		for to in &mail.to {
			if !to.contains('@') {
				return Err(Error::ValidationError(format!("Invalid recipient: {}", to)));
			}
			builder = builder.to(to
				.parse()
				.map_err(|_| Error::ValidationError(format!("Invalid recipient: {}", to)))?);
		}
		let email = builder
			.singlepart(lettre::message::SinglePart::plain(mail.body.clone()))
			.map_err(|e| Error::ValidationError(format!("Failed to build email: {}", e)))?;

		let transport = self.build_transport().await?;
		transport
			.send(&email)
			.map_err(|e| Error::MailError(format!("SMTP send failed: {}", e)))?;
		Ok(())
	}

	async fn build_transport(&self) -> MlResult<SmtpTransport> {
		let Some(smtp) = SmtpOverride::resolve(&self.registry, &*self.store).await? else {
			// System default: local relay without authentication
			debug!("No SMTP override, using local relay");
			return Ok(SmtpTransport::builder_dangerous("localhost").port(25).build());
		};

		debug!("Sending via {}:{} ({:?})", smtp.host, smtp.port, smtp.tls);
		let tls = match smtp.tls {
			SmtpTls::Tls => lettre::transport::smtp::client::Tls::Wrapper(
				lettre::transport::smtp::client::TlsParameters::builder(smtp.host.clone())
					.build()
					.map_err(|e| Error::ConfigError(format!("TLS configuration error: {}", e)))?,
			),
			SmtpTls::StartTls => lettre::transport::smtp::client::Tls::Required(
				lettre::transport::smtp::client::TlsParameters::builder(smtp.host.clone())
					.build()
					.map_err(|e| Error::ConfigError(format!("TLS configuration error: {}", e)))?,
			),
			SmtpTls::None => lettre::transport::smtp::client::Tls::None,
		};

		let mut builder = SmtpTransport::builder_dangerous(&smtp.host)
			.port(smtp.port)
			.timeout(Some(SMTP_TIMEOUT))
			.tls(tls);
		if !smtp.username.is_empty() {
			builder = builder.credentials(Credentials::new(smtp.username, smtp.password));
		}
		Ok(builder.build())
	}
}


// vim: ts=4
