//! Mailgun HTTP API backend.
//!
//! Messages are posted as multipart form data to
//! `{base_url}/v3/{domain}/messages` with HTTP basic auth `api:<key>`.
//! Any non-2xx answer is reported as [`MailError::Api`]; there are no retries.

use std::time::Duration;

use lettre::Address;

use crate::{Mailer, MailError, OutgoingEmail};

/// HTTP request timeout for a single send.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct MailgunMailer {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    sender: Option<Address>,
}

impl MailgunMailer {
    pub fn new(
        api_key: String,
        domain: String,
        base_url: String,
        sender: Option<Address>,
    ) -> Result<Self, MailError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            endpoint: messages_endpoint(&base_url, &domain),
            sender,
        })
    }

    /// Form fields for the messages endpoint.
    fn form_fields(&self, email: &OutgoingEmail) -> Result<Vec<(&'static str, String)>, MailError> {
        let envelope = email.envelope(self.sender.as_ref())?;
        let mut fields = vec![
            ("from", envelope.from.to_string()),
            ("to", envelope.to.to_string()),
            ("subject", email.subject.clone()),
            ("text", email.text.clone()),
        ];
        if let Some(reply_to) = envelope.reply_to {
            fields.push(("h:Reply-To", reply_to.to_string()));
        }
        Ok(fields)
    }
}

fn messages_endpoint(base_url: &str, domain: &str) -> String {
    format!("{}/v3/{domain}/messages", base_url.trim_end_matches('/'))
}

#[async_trait::async_trait]
impl Mailer for MailgunMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let form = self
            .form_fields(email)?
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                form.text(name, value)
            });

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth("api", Some(&self.api_key))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "Mailgun rejected message");
            return Err(MailError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(to = %email.to, "Email sent via Mailgun");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mailgun"
    }
}
