//! Handlers for `/admin/pages`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pita_core::error::CoreError;
use pita_core::page::PageKind;
use pita_core::types::DbId;
use pita_db::models::page::{CreatePage, Page, PageSummary, UpdatePage};
use pita_db::repositories::PageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::services::comic::discard_comic_files;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Page", id })
}

/// GET /admin/pages
///
/// Every page grouped by kind, with artwork counts for collections.
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PageSummary>>>> {
    let pages = PageRepo::list_summaries(&state.pool).await?;
    Ok(Json(DataResponse { data: pages }))
}

/// POST /admin/pages
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreatePage>,
) -> AppResult<(StatusCode, Json<DataResponse<Page>>)> {
    input.validate()?;
    let page = PageRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: page })))
}

/// GET /admin/pages/{id}
pub async fn get_by_id(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Page>>> {
    let page = PageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: page }))
}

/// PUT /admin/pages/{id}
///
/// The kind of a page is fixed; fields belonging to other kinds are
/// rejected.
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePage>,
) -> AppResult<Json<DataResponse<Page>>> {
    let existing = PageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    input.validate(existing.kind())?;

    let page = PageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: page }))
}

/// DELETE /admin/pages/{id}
///
/// Artworks of a deleted collection stay, unassigned. A deleted comic takes
/// its pages and their images with it.
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let page = PageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if page.kind() == PageKind::Comic {
        let removed = discard_comic_files(&state, id).await?;
        tracing::debug!(comic_id = id, removed, "Comic page files removed");
    }
    if !PageRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}
