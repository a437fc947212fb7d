//! Upload workflows that span the media store and the database.
//!
//! Handlers stay thin; anything that writes files and rows together lives
//! here so partial failures can clean up after themselves.

pub mod artwork;
pub mod comic;

use pita_core::error::CoreError;
use pita_core::imaging::{self, ImageInfo, ThumbnailConfig};
use pita_core::page::PageKind;
use pita_core::types::DbId;
use pita_db::models::page::Page;
use pita_db::repositories::PageRepo;
use pita_db::DbPool;

use crate::error::{AppError, AppResult};

/// An uploaded file as received from a multipart form.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Load a page and require it to be of `kind`.
pub async fn require_page(pool: &DbPool, id: DbId, kind: PageKind) -> AppResult<Page> {
    match PageRepo::find_by_id(pool, id).await? {
        Some(page) if page.kind() == kind => Ok(page),
        _ => Err(AppError::Core(CoreError::NotFound {
            entity: kind.label(),
            id,
        })),
    }
}

/// Check that an artwork's `collection_id` names a collection page.
pub async fn ensure_collection(pool: &DbPool, id: DbId) -> AppResult<()> {
    match PageRepo::find_by_id(pool, id).await? {
        Some(page) if page.kind() == PageKind::Collection => Ok(()),
        _ => Err(AppError::Core(CoreError::Validation(format!(
            "collection_id {id} does not refer to a collection"
        )))),
    }
}

/// Probe the upload and render its thumbnail off the async runtime.
pub(crate) async fn inspect_with_thumbnail(
    bytes: Vec<u8>,
    config: ThumbnailConfig,
) -> AppResult<(ImageInfo, Vec<u8>, Vec<u8>)> {
    tokio::task::spawn_blocking(move || {
        let info = imaging::probe(&bytes)?;
        let thumbnail = imaging::create_thumbnail(&bytes, &config)?;
        Ok::<_, AppError>((info, thumbnail, bytes))
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Thumbnail task failed: {e}")))?
}
