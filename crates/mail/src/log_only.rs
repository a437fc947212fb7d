//! Development backend that logs messages instead of sending them.

use lettre::Address;

use crate::{Mailer, MailError, OutgoingEmail};

pub struct LogMailer {
    sender: Option<Address>,
}

impl LogMailer {
    pub fn new(sender: Option<Address>) -> Self {
        Self { sender }
    }
}

#[async_trait::async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let envelope = email.envelope(self.sender.as_ref())?;
        tracing::info!(
            from = %envelope.from,
            to = %envelope.to,
            subject = %email.subject,
            body = %email.text,
            "Email not sent (log backend)",
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
