//! Contact form validation and message composition.

use serde::{Deserialize, Serialize};

use crate::settings::{SettingKey, SiteSettings};

/// Raw contact form fields as posted by the browser.
///
/// Every field defaults to empty so a hand-crafted POST missing fields is
/// reported as invalid rather than rejected by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
}

/// Outcome of a contact form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    Success,
    /// A required field was empty.
    Invalid,
    /// The email provider rejected the request.
    ApiError,
    /// The sender or recipient address was rejected.
    InvalidAddress,
    /// Anything else went wrong while sending.
    Error,
}

impl ContactStatus {
    /// The settings key holding the user-facing message for this outcome.
    pub fn setting_key(self) -> SettingKey {
        match self {
            Self::Success => SettingKey::EmailSuccess,
            Self::Invalid => SettingKey::EmailInvalid,
            Self::ApiError => SettingKey::EmailApiError,
            Self::InvalidAddress => SettingKey::EmailInvalidAddress,
            Self::Error => SettingKey::EmailError,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// CSS class / message level used when rendering the status.
    pub fn level(self) -> &'static str {
        if self.is_success() {
            "success"
        } else {
            "error"
        }
    }

    /// The rendered message for this outcome.
    pub fn message(self, settings: &SiteSettings) -> String {
        settings.message(self.setting_key())
    }
}

/// A validated contact message ready to hand to a mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub sender_name: String,
    pub sender_address: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl ContactForm {
    /// Whether all four fields carry non-blank text.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.from_email, &self.subject, &self.message]
            .iter()
            .all(|f| !f.trim().is_empty())
    }

    /// Build the outgoing message, or `None` when a field is missing.
    ///
    /// The subject is `"{prefix} {name}: {subject}"` and the message goes to
    /// the configured contact address.
    pub fn compose(&self, settings: &SiteSettings) -> Option<ContactMessage> {
        if !self.is_complete() {
            return None;
        }
        let name = self.name.trim();
        let prefix = settings.get(SettingKey::SubjectPrefix).trim();
        let subject = if prefix.is_empty() {
            format!("{name}: {}", self.subject.trim())
        } else {
            format!("{prefix} {name}: {}", self.subject.trim())
        };

        Some(ContactMessage {
            sender_name: name.to_string(),
            sender_address: self.from_email.trim().to_string(),
            recipient: settings.contact_address().to_string(),
            subject,
            body: self.message.clone(),
        })
    }
}
