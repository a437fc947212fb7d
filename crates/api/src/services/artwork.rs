//! Artwork uploads: the image, its square thumbnail and the row that points
//! at both.
//!
//! A new artwork is named after its id, which only exists once the row is
//! inserted. Files are written under temporary names, the row is inserted,
//! the files are renamed to their final keys and the keys are saved, all
//! before the transaction commits. Any failure rolls back the row and
//! removes whatever files were written.

use pita_core::error::CoreError;
use pita_core::naming;
use pita_core::types::DbId;
use pita_db::models::artwork::{Artwork, ArtworkFields, ArtworkImage, NewArtwork};
use pita_db::repositories::ArtworkRepo;

use crate::error::{AppError, AppResult};
use crate::services::{ensure_collection, inspect_with_thumbnail, Upload};
use crate::state::AppState;

/// Store an uploaded artwork and create its row.
pub async fn create_artwork(
    state: &AppState,
    upload: Upload,
    fields: ArtworkFields,
) -> AppResult<Artwork> {
    fields.validate()?;
    if let Some(collection_id) = fields.collection_id {
        ensure_collection(&state.pool, collection_id).await?;
    }
    let ext = naming::upload_extension(&upload.filename)?;
    let (info, thumbnail, bytes) =
        inspect_with_thumbnail(upload.bytes, state.config.thumbnail).await?;

    let (tmp_image, tmp_thumbnail) = naming::temporary_artwork_paths(&ext);
    let mut written = Vec::with_capacity(4);

    let result = async {
        state.media.write(&tmp_image, &bytes).await?;
        written.push(tmp_image.clone());
        state.media.write(&tmp_thumbnail, &thumbnail).await?;
        written.push(tmp_thumbnail.clone());

        let mut tx = state.pool.begin().await?;
        let inserted = ArtworkRepo::insert(
            &mut tx,
            &NewArtwork {
                image: tmp_image.clone(),
                thumbnail: tmp_thumbnail.clone(),
                width: i64::from(info.width),
                height: i64::from(info.height),
                fields,
            },
        )
        .await?;

        let image = naming::artwork_image_path(inserted.id, &ext);
        let thumb = naming::artwork_thumbnail_path(inserted.id);
        state.media.rename(&tmp_image, &image).await?;
        written.push(image.clone());
        state.media.rename(&tmp_thumbnail, &thumb).await?;
        written.push(thumb.clone());

        let artwork = ArtworkRepo::set_files(&mut tx, inserted.id, &image, &thumb).await?;
        tx.commit().await?;
        Ok::<_, AppError>(artwork)
    }
    .await;

    match result {
        Ok(artwork) => {
            tracing::info!(
                artwork_id = artwork.id,
                image = %artwork.image,
                width = artwork.width,
                height = artwork.height,
                "Artwork uploaded",
            );
            Ok(artwork)
        }
        Err(e) => {
            for key in &written {
                state.media.discard(key).await;
            }
            Err(e)
        }
    }
}

/// Swap an artwork's image for a new upload and regenerate its thumbnail.
///
/// The new files are staged under temporary keys and only moved over the
/// live ones once the row update has succeeded.
pub async fn replace_artwork_image(
    state: &AppState,
    id: DbId,
    upload: Upload,
) -> AppResult<Artwork> {
    let existing = ArtworkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;
    let ext = naming::upload_extension(&upload.filename)?;
    let (info, thumbnail, bytes) =
        inspect_with_thumbnail(upload.bytes, state.config.thumbnail).await?;

    let (tmp_image, tmp_thumbnail) = naming::temporary_artwork_paths(&ext);
    let image = naming::artwork_image_path(id, &ext);
    let thumb = naming::artwork_thumbnail_path(id);

    let result = async {
        state.media.write(&tmp_image, &bytes).await?;
        state.media.write(&tmp_thumbnail, &thumbnail).await?;

        let mut tx = state.pool.begin().await?;
        let updated = ArtworkRepo::replace_image(
            &mut tx,
            id,
            &ArtworkImage {
                image: image.clone(),
                thumbnail: thumb.clone(),
                width: i64::from(info.width),
                height: i64::from(info.height),
            },
        )
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;

        state.media.rename(&tmp_image, &image).await?;
        state.media.rename(&tmp_thumbnail, &thumb).await?;
        tx.commit().await?;
        Ok::<_, AppError>(updated)
    }
    .await;

    let updated = match result {
        Ok(updated) => updated,
        Err(e) => {
            state.media.discard(&tmp_image).await;
            state.media.discard(&tmp_thumbnail).await;
            return Err(e);
        }
    };

    // A different extension leaves the old image behind under another name.
    if existing.image != image {
        state.media.discard(&existing.image).await;
    }
    if existing.thumbnail != thumb {
        state.media.discard(&existing.thumbnail).await;
    }

    tracing::info!(artwork_id = id, image = %updated.image, "Artwork image replaced");
    Ok(updated)
}

/// Delete an artwork and its files.
pub async fn delete_artwork(state: &AppState, id: DbId) -> AppResult<()> {
    let artwork = ArtworkRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;
    state.media.discard(&artwork.image).await;
    state.media.discard(&artwork.thumbnail).await;
    tracing::info!(artwork_id = id, "Artwork deleted");
    Ok(())
}
