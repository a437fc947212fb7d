//! SMTP backend over a lettre STARTTLS relay.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::{Mailer, MailError, OutgoingEmail};

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Option<Address>,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig, sender: Option<Address>) -> Result<Self, MailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?.port(config.port);
        if let (Some(user), Some(password)) = (config.user, config.password) {
            builder = builder.credentials(Credentials::new(user, password));
        }
        Ok(Self {
            transport: builder.build(),
            sender,
        })
    }

    fn message(&self, email: &OutgoingEmail) -> Result<Message, MailError> {
        let envelope = email.envelope(self.sender.as_ref())?;
        let mut builder = Message::builder()
            .from(envelope.from)
            .to(envelope.to)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_PLAIN);
        if let Some(reply_to) = envelope.reply_to {
            builder = builder.reply_to(reply_to);
        }
        builder
            .body(email.text.clone())
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait::async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = self.message(email)?;
        self.transport.send(message).await?;
        tracing::info!(to = %email.to, "Email sent via SMTP");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
