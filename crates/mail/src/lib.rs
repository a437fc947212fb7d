//! Outbound email for the contact form.
//!
//! [`Mailer`] is the seam the HTTP layer sends through. Three backends are
//! provided: [`MailgunMailer`] (Mailgun HTTP API), [`SmtpMailer`] (lettre
//! STARTTLS relay) and [`LogMailer`] (writes the message to the log, for
//! development). [`build_mailer`] picks one from a [`MailConfig`].

use std::sync::Arc;

use lettre::message::Mailbox;
use lettre::Address;

pub mod config;
pub mod error;
pub mod log_only;
pub mod mailgun;
pub mod smtp;

pub use config::{MailBackend, MailConfig, SmtpConfig};
pub use error::MailError;
pub use log_only::LogMailer;
pub use mailgun::MailgunMailer;
pub use smtp::SmtpMailer;

/// A plain-text message to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Display name of the sender.
    pub from_name: String,
    pub from_address: String,
    /// Recipient address.
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Parsed header mailboxes for an [`OutgoingEmail`].
#[derive(Debug, Clone)]
pub struct Envelope {
    pub from: Mailbox,
    /// Set when the configured sender replaces the submitter in `From`.
    pub reply_to: Option<Mailbox>,
    pub to: Mailbox,
}

impl OutgoingEmail {
    /// Parse the sender and recipient.
    ///
    /// With `sender` set, `From` uses that address (keeping the submitter's
    /// display name) and the submitter moves to `Reply-To`. Relays that only
    /// accept their own domain in `From` need this.
    pub fn envelope(&self, sender: Option<&Address>) -> Result<Envelope, MailError> {
        let submitter = Mailbox::new(
            Some(self.from_name.clone()),
            parse_address(&self.from_address)?,
        );
        let to = Mailbox::new(None, parse_address(&self.to)?);

        Ok(match sender {
            Some(address) => Envelope {
                from: Mailbox::new(Some(self.from_name.clone()), address.clone()),
                reply_to: Some(submitter),
                to,
            },
            None => Envelope {
                from: submitter,
                reply_to: None,
                to,
            },
        })
    }
}

/// Parse a bare email address, reporting failures as
/// [`MailError::InvalidAddress`].
pub fn parse_address(address: &str) -> Result<Address, MailError> {
    address
        .trim()
        .parse::<Address>()
        .map_err(|e| MailError::InvalidAddress(format!("'{address}': {e}")))
}

/// Sends [`OutgoingEmail`]s.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

/// Construct the mailer selected by `config`.
pub fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    let sender = config.sender.as_deref().map(parse_address).transpose()?;
    let mailer: Arc<dyn Mailer> = match &config.backend {
        MailBackend::Mailgun {
            api_key,
            domain,
            base_url,
        } => Arc::new(MailgunMailer::new(
            api_key.clone(),
            domain.clone(),
            base_url.clone(),
            sender,
        )?),
        MailBackend::Smtp(smtp) => Arc::new(SmtpMailer::new(smtp.clone(), sender)?),
        MailBackend::Log => Arc::new(LogMailer::new(sender)),
    };
    tracing::info!(backend = mailer.name(), "Mailer configured");
    Ok(mailer)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // `assert_matches!` needs `Debug` on the matched `Result`.
    impl std::fmt::Debug for dyn Mailer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Mailer").field("name", &self.name()).finish()
        }
    }

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            from_name: "Ada Lovelace".into(),
            from_address: "ada@example.com".into(),
            to: "artist@example.com".into(),
            subject: "[site] Ada Lovelace: Hello".into(),
            text: "Hi there".into(),
        }
    }

    #[test]
    fn envelope_uses_submitter_as_sender() {
        let envelope = email().envelope(None).unwrap();
        assert_eq!(envelope.from.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(envelope.from.email.to_string(), "ada@example.com");
        assert_eq!(envelope.to.email.to_string(), "artist@example.com");
        assert!(envelope.reply_to.is_none());
    }

    #[test]
    fn configured_sender_moves_submitter_to_reply_to() {
        let sender: Address = "site@example.org".parse().unwrap();
        let envelope = email().envelope(Some(&sender)).unwrap();
        assert_eq!(envelope.from.email, sender);
        assert_eq!(
            envelope.reply_to.unwrap().email.to_string(),
            "ada@example.com"
        );
    }

    #[test]
    fn bad_addresses_are_invalid_address_errors() {
        let mut bad_sender = email();
        bad_sender.from_address = "not an address".into();
        assert_matches!(bad_sender.envelope(None), Err(MailError::InvalidAddress(_)));

        let mut bad_recipient = email();
        bad_recipient.to = "nobody".into();
        assert_matches!(bad_recipient.envelope(None), Err(MailError::InvalidAddress(_)));
    }

    #[test]
    fn log_backend_builds_without_credentials() {
        let config = MailConfig {
            backend: MailBackend::Log,
            sender: None,
        };
        let mailer = build_mailer(&config).unwrap();
        assert_eq!(mailer.name(), "log");
    }

    #[test]
    fn invalid_configured_sender_is_rejected() {
        let config = MailConfig {
            backend: MailBackend::Log,
            sender: Some("bogus".into()),
        };
        assert_matches!(build_mailer(&config), Err(MailError::InvalidAddress(_)));
    }
}
