//! Artwork entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use pita_core::error::CoreError;
use pita_core::naming;
use pita_core::page::validate_position;
use pita_core::types::{Date, DbId, Timestamp};

use super::double_option;

/// Maximum artwork title length (characters).
pub const MAX_ARTWORK_TITLE_LEN: usize = 200;

/// A row from the `artworks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artwork {
    pub id: DbId,
    /// Storage key of the full-size image.
    pub image: String,
    /// Storage key of the square JPEG thumbnail.
    pub thumbnail: String,
    pub width: i64,
    pub height: i64,
    pub title: String,
    pub description: String,
    pub collection_id: Option<DbId>,
    pub uploaded: Date,
    pub created: Option<Date>,
    pub position: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Artwork {
    /// Base name of the image file.
    pub fn filename(&self) -> &str {
        naming::file_name(&self.image)
    }

    /// Text used for link titles and image alt text.
    pub fn summary(&self) -> String {
        if !self.description.is_empty() {
            self.description.clone()
        } else if !self.title.is_empty() {
            self.title.clone()
        } else {
            format!("Artwork #{}", self.id)
        }
    }
}

/// Editable artwork metadata, shared by uploads and inserts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtworkFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub collection_id: Option<DbId>,
    pub created: Option<Date>,
    #[serde(default)]
    pub position: i64,
}

impl ArtworkFields {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_artwork_title(&self.title)?;
        validate_position(self.position)
    }
}

/// Row data for inserting an artwork whose files are already stored.
#[derive(Debug, Clone)]
pub struct NewArtwork {
    pub image: String,
    pub thumbnail: String,
    pub width: i64,
    pub height: i64,
    pub fields: ArtworkFields,
}

/// DTO for updating artwork metadata. All fields are optional.
///
/// `collection_id` and `created` accept an explicit `null` to clear them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateArtwork {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub collection_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub created: Option<Option<Date>>,
    pub position: Option<i64>,
}

impl UpdateArtwork {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(title) = &self.title {
            validate_artwork_title(title)?;
        }
        if let Some(position) = self.position {
            validate_position(position)?;
        }
        Ok(())
    }
}

/// Replacement image data for an existing artwork.
#[derive(Debug, Clone)]
pub struct ArtworkImage {
    pub image: String,
    pub thumbnail: String,
    pub width: i64,
    pub height: i64,
}

fn validate_artwork_title(title: &str) -> Result<(), CoreError> {
    if title.chars().count() > MAX_ARTWORK_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Artwork title must be at most {MAX_ARTWORK_TITLE_LEN} characters"
        )));
    }
    Ok(())
}
