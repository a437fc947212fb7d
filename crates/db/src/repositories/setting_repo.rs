//! Repository for the `site_settings` table.

use chrono::Utc;
use sqlx::SqlitePool;
use pita_core::settings::{SettingKey, SiteSettings};

use crate::models::setting::SiteSetting;

/// Column list for site_settings queries.
const COLUMNS: &str = "key, value, updated_at";

/// Provides access to stored setting overrides.
pub struct SettingRepo;

impl SettingRepo {
    /// List stored overrides.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<SiteSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_settings ORDER BY key");
        sqlx::query_as::<_, SiteSetting>(&query).fetch_all(pool).await
    }

    /// Load the effective settings: built-in defaults with stored overrides
    /// applied.
    pub async fn load(pool: &SqlitePool) -> Result<SiteSettings, sqlx::Error> {
        let rows = Self::list(pool).await?;
        Ok(SiteSettings::with_overrides(
            rows.into_iter().map(|row| (row.key, row.value)),
        ))
    }

    /// Apply a batch of changes atomically. `None` removes the override so
    /// the key falls back to its default.
    pub async fn apply(
        pool: &SqlitePool,
        changes: &[(SettingKey, Option<String>)],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        let now = Utc::now();
        for (key, value) in changes {
            match value {
                Some(value) => {
                    sqlx::query(
                        "INSERT INTO site_settings (key, value, updated_at) VALUES (?1, ?2, ?3)
                         ON CONFLICT (key) DO UPDATE SET
                            value = excluded.value, updated_at = excluded.updated_at",
                    )
                    .bind(key.as_str())
                    .bind(value)
                    .bind(now)
                    .execute(&mut *tx)
                    .await?;
                }
                None => {
                    sqlx::query("DELETE FROM site_settings WHERE key = ?1")
                        .bind(key.as_str())
                        .execute(&mut *tx)
                        .await?;
                }
            }
        }
        tx.commit().await?;

        tracing::info!(count = changes.len(), "Site settings updated");
        Ok(())
    }
}
