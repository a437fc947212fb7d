//! Comic page uploads and file cleanup.

use pita_core::error::CoreError;
use pita_core::imaging;
use pita_core::naming;
use pita_core::page::PageKind;
use pita_core::types::DbId;
use pita_db::models::comic_page::{ComicPage, ComicPageFields, NewComicPage};
use pita_db::repositories::ComicPageRepo;

use crate::error::{AppError, AppResult};
use crate::services::{require_page, Upload};
use crate::state::AppState;

/// Store an uploaded page image and append it to a comic.
///
/// Without an explicit number the page goes after the current last one.
pub async fn add_comic_page(
    state: &AppState,
    comic_id: DbId,
    upload: Upload,
    fields: ComicPageFields,
) -> AppResult<ComicPage> {
    fields.validate()?;
    let comic = require_page(&state.pool, comic_id, PageKind::Comic).await?;

    let number = match fields.number {
        Some(number) => number,
        None => ComicPageRepo::next_number(&state.pool, comic_id).await?,
    };
    if ComicPageRepo::find(&state.pool, comic_id, number)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "{} already has a page {number}",
            comic.title
        ))));
    }

    let ext = naming::upload_extension(&upload.filename)?;
    let info = imaging::probe(&upload.bytes)?;
    let key = naming::comic_page_path(&comic.slug, number, &ext);
    state.media.write(&key, &upload.bytes).await?;

    let created = ComicPageRepo::create(
        &state.pool,
        &NewComicPage {
            comic_id,
            number,
            title: fields.title,
            image: key.clone(),
            width: i64::from(info.width),
            height: i64::from(info.height),
        },
    )
    .await;

    match created {
        Ok(page) => Ok(page),
        Err(e) => {
            state.media.discard(&key).await;
            Err(e.into())
        }
    }
}

/// Delete a comic page and its image.
pub async fn delete_comic_page(state: &AppState, id: DbId) -> AppResult<()> {
    let page = ComicPageRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ComicPage",
            id,
        }))?;
    state.media.discard(&page.image).await;
    tracing::info!(comic_id = page.comic_id, number = page.number, "Comic page deleted");
    Ok(())
}

/// Remove the image files of every page of a comic. The rows themselves go
/// with the comic through the cascading foreign key.
pub async fn discard_comic_files(state: &AppState, comic_id: DbId) -> AppResult<usize> {
    let pages = ComicPageRepo::list_by_comic(&state.pool, comic_id).await?;
    for page in &pages {
        state.media.discard(&page.image).await;
    }
    Ok(pages.len())
}
