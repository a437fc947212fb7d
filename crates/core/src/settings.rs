//! Runtime-editable site settings.
//!
//! Every setting has a built-in default; the `site_settings` table only holds
//! overrides made through the admin API. The key set is closed.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use validator::ValidateEmail;

use crate::error::CoreError;

/// A known site setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SettingKey {
    // General
    Title,
    Name,
    Description,
    CopyrightYears,
    TermsOfServiceUrl,
    // Contact
    ContactTitle,
    ContactDescription,
    EmailName,
    EmailAddress,
    SubjectPrefix,
    // Contact form status messages
    EmailApiError,
    EmailError,
    EmailInvalid,
    EmailInvalidAddress,
    EmailSuccess,
}

/// Settings grouped the way the admin API presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SettingGroup {
    General,
    Contact,
    Email,
}

const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred when sending your email. \
    Please try again later, or directly send an email to {email}.";

impl SettingKey {
    pub const ALL: [SettingKey; 15] = [
        SettingKey::Title,
        SettingKey::Name,
        SettingKey::Description,
        SettingKey::CopyrightYears,
        SettingKey::TermsOfServiceUrl,
        SettingKey::ContactTitle,
        SettingKey::ContactDescription,
        SettingKey::EmailName,
        SettingKey::EmailAddress,
        SettingKey::SubjectPrefix,
        SettingKey::EmailApiError,
        SettingKey::EmailError,
        SettingKey::EmailInvalid,
        SettingKey::EmailInvalidAddress,
        SettingKey::EmailSuccess,
    ];

    /// The value stored in `site_settings.key`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "TITLE",
            Self::Name => "NAME",
            Self::Description => "DESCRIPTION",
            Self::CopyrightYears => "COPYRIGHT_YEARS",
            Self::TermsOfServiceUrl => "TERMS_OF_SERVICE_URL",
            Self::ContactTitle => "CONTACT_TITLE",
            Self::ContactDescription => "CONTACT_DESCRIPTION",
            Self::EmailName => "EMAIL_NAME",
            Self::EmailAddress => "EMAIL_ADDRESS",
            Self::SubjectPrefix => "SUBJECT_PREFIX",
            Self::EmailApiError => "EMAIL_API_ERROR",
            Self::EmailError => "EMAIL_ERROR",
            Self::EmailInvalid => "EMAIL_INVALID",
            Self::EmailInvalidAddress => "EMAIL_INVALID_ADDRESS",
            Self::EmailSuccess => "EMAIL_SUCCESS",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    pub fn default_value(self) -> &'static str {
        match self {
            Self::Title => "Art by Peter Sang",
            Self::Name => "Peter Sang",
            Self::Description => "",
            Self::CopyrightYears => "2018",
            Self::TermsOfServiceUrl => "",
            Self::ContactTitle => "Contact",
            Self::ContactDescription => "",
            Self::EmailName => "Peter Sang",
            Self::EmailAddress => "saltedpita@gmail.com",
            Self::SubjectPrefix => "[saltedpita.com]",
            Self::EmailApiError => {
                "The server was unable to send your email. Please try again later, \
                 or directly send an email to {email}."
            }
            Self::EmailError | Self::EmailInvalid => UNKNOWN_ERROR_MESSAGE,
            Self::EmailInvalidAddress => "Invalid email address.",
            Self::EmailSuccess => "Email sent successfully.",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Self::Title => "The site title, used in tab titles",
            Self::Description => "The site description, used for metadata",
            Self::ContactTitle => "The title of the contact page",
            Self::ContactDescription => "The text to display above the contact form",
            Self::EmailName => "The name to send email as",
            Self::EmailAddress => "The address contact form messages are sent to",
            Self::SubjectPrefix => {
                "The subject line prefix for any emails sent from the contact form"
            }
            _ => "",
        }
    }

    pub fn group(self) -> SettingGroup {
        match self {
            Self::Title
            | Self::Name
            | Self::Description
            | Self::CopyrightYears
            | Self::TermsOfServiceUrl => SettingGroup::General,
            Self::ContactTitle
            | Self::ContactDescription
            | Self::EmailName
            | Self::EmailAddress
            | Self::SubjectPrefix => SettingGroup::Contact,
            Self::EmailApiError
            | Self::EmailError
            | Self::EmailInvalid
            | Self::EmailInvalidAddress
            | Self::EmailSuccess => SettingGroup::Email,
        }
    }
}

/// Validate an admin update to a single setting.
pub fn validate_update(name: &str, value: &str) -> Result<SettingKey, CoreError> {
    let key = SettingKey::from_name(name)
        .ok_or_else(|| CoreError::Validation(format!("Unknown setting '{name}'")))?;

    match key {
        SettingKey::EmailAddress if !value.trim().to_string().validate_email() => Err(
            CoreError::Validation(format!("'{value}' is not a valid email address")),
        ),
        SettingKey::Title if value.trim().is_empty() => {
            Err(CoreError::Validation("The site title must not be empty".into()))
        }
        _ => Ok(key),
    }
}

/// The effective settings: defaults with stored overrides applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    values: BTreeMap<SettingKey, String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            values: SettingKey::ALL
                .into_iter()
                .map(|k| (k, k.default_value().to_string()))
                .collect(),
        }
    }
}

impl SiteSettings {
    /// Apply stored `(key, value)` rows over the defaults. Rows with unknown
    /// keys are skipped.
    pub fn with_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut settings = Self::default();
        for (name, value) in overrides {
            match SettingKey::from_name(&name) {
                Some(key) => {
                    settings.values.insert(key, value);
                }
                None => tracing::warn!(key = %name, "Ignoring unknown site setting"),
            }
        }
        settings
    }

    pub fn get(&self, key: SettingKey) -> &str {
        self.values
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_value())
    }

    pub fn title(&self) -> &str {
        self.get(SettingKey::Title)
    }

    pub fn contact_address(&self) -> &str {
        self.get(SettingKey::EmailAddress)
    }

    /// A message template with `{email}` replaced by the contact address.
    pub fn message(&self, key: SettingKey) -> String {
        self.get(key).replace("{email}", self.contact_address())
    }

    /// All settings by key name, for the admin API.
    pub fn to_map(&self) -> HashMap<&'static str, String> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect()
    }
}
