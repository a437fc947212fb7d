//! Site setting override model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use pita_core::types::Timestamp;

/// A row from the `site_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteSetting {
    pub key: String,
    pub value: String,
    pub updated_at: Timestamp,
}

/// DTO for updating settings: key name -> new value. A `null` value resets
/// the key to its built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct UpdateSettings(pub std::collections::BTreeMap<String, Option<String>>);
