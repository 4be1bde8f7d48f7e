//! Email delivery abstractions.
//!
//! OTP codes go out synchronously on the request path: the handler derives
//! the code, hands a message to an `EmailSender`, and reports delivery
//! failure to the caller instead of retrying. The default sender for local
//! dev is `LogEmailSender`, which logs and returns `Ok(())`; production
//! wires `SmtpSender` from the CLI flags.

use anyhow::{Context, Result};
use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, Message, SmtpTransport,
    Transport,
};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::info;

#[derive(Clone, Debug)]
pub struct EmailMessage {
    pub to_email: String,
    pub subject: String,
    pub body: String,
}

/// Email delivery abstraction behind the OTP request path.
pub trait EmailSender: Send + Sync {
    /// Deliver a message or return an error for the caller to surface.
    fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Local dev sender that logs the payload instead of sending real email.
#[derive(Clone, Debug)]
pub struct LogEmailSender;

impl EmailSender for LogEmailSender {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            to_email = %message.to_email,
            subject = %message.subject,
            body = %message.body,
            "email send stub"
        );
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub from: String,
    pub timeout: Duration,
}

/// STARTTLS SMTP sender with a bounded connection timeout.
///
/// `send` blocks; callers on the async runtime must wrap it in
/// `spawn_blocking`.
pub struct SmtpSender {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpSender {
    /// # Errors
    /// Returns an error when the relay host is unusable or the `from`
    /// address does not parse as a mailbox.
    pub fn new(config: SmtpConfig) -> Result<Self> {
        let from = config
            .from
            .parse::<Mailbox>()
            .with_context(|| format!("invalid sender address: {}", config.from))?;

        let mut builder = SmtpTransport::starttls_relay(&config.host)
            .with_context(|| format!("failed to configure SMTP relay: {}", config.host))?
            .timeout(Some(config.timeout));

        if let (Some(username), Some(password)) = (config.username, config.password) {
            builder = builder.credentials(Credentials::new(
                username,
                password.expose_secret().to_string(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

impl EmailSender for SmtpSender {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        let to = message
            .to_email
            .parse::<Mailbox>()
            .with_context(|| format!("invalid recipient address: {}", message.to_email))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.clone())
            .body(message.body.clone())
            .context("failed to build email message")?;

        self.transport
            .send(&email)
            .with_context(|| format!("SMTP delivery to {} failed", message.to_email))?;

        Ok(())
    }
}
