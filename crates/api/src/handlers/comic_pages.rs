//! Handlers for comic pages in the admin API.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use pita_core::page::PageKind;
use pita_core::types::DbId;
use pita_db::models::comic_page::{ComicPage, ComicPageFields};
use pita_db::repositories::ComicPageRepo;

use crate::error::AppResult;
use crate::handlers::upload::UploadForm;
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::services::{comic as service, require_page};
use crate::state::AppState;

/// GET /admin/comics/{comic_id}/pages
pub async fn list_by_comic(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ComicPage>>>> {
    require_page(&state.pool, comic_id, PageKind::Comic).await?;
    let pages = ComicPageRepo::list_by_comic(&state.pool, comic_id).await?;
    Ok(Json(DataResponse { data: pages }))
}

/// POST /admin/comics/{comic_id}/pages
///
/// Multipart upload with a `file` part and optional `number` and `title`.
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ComicPage>>)> {
    let mut form = UploadForm::read(multipart).await?;
    let upload = form.take_file()?;
    let fields = ComicPageFields {
        number: form.parse("number")?,
        title: form.text("title"),
    };

    let page = service::add_comic_page(&state, comic_id, upload, fields).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: page })))
}

/// DELETE /admin/comic-pages/{id}
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    service::delete_comic_page(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
