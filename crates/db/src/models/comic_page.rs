//! Comic page entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use pita_core::error::CoreError;
use pita_core::types::{Date, DbId, Timestamp};

/// A row from the `comic_pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ComicPage {
    pub id: DbId,
    pub comic_id: DbId,
    /// 1-based sequence number within the comic.
    pub number: i64,
    pub title: String,
    pub image: String,
    pub width: i64,
    pub height: i64,
    pub uploaded: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Editable comic page fields sent alongside an upload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComicPageFields {
    /// Defaults to one past the current last page.
    pub number: Option<i64>,
    #[serde(default)]
    pub title: String,
}

impl ComicPageFields {
    pub fn validate(&self) -> Result<(), CoreError> {
        if matches!(self.number, Some(n) if n < 1) {
            return Err(CoreError::Validation(
                "Comic page numbers start at 1".into(),
            ));
        }
        Ok(())
    }
}

/// Row data for inserting a comic page whose image is already stored.
#[derive(Debug, Clone)]
pub struct NewComicPage {
    pub comic_id: DbId,
    pub number: i64,
    pub title: String,
    pub image: String,
    pub width: i64,
    pub height: i64,
}

/// Neighbouring page numbers for reader navigation. `None` where no such page
/// exists (e.g. `prev` on the first page).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComicNavigation {
    pub first: Option<i64>,
    pub prev: Option<i64>,
    pub next: Option<i64>,
    pub last: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_numbers_start_at_one() {
        let zero = ComicPageFields {
            number: Some(0),
            ..Default::default()
        };
        assert!(zero.validate().is_err());
        assert!(ComicPageFields::default().validate().is_ok());
    }
}
