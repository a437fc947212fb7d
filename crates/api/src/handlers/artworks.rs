//! Handlers for `/admin/artworks`.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use pita_core::error::CoreError;
use pita_core::types::DbId;
use pita_db::models::artwork::{Artwork, ArtworkFields, UpdateArtwork};
use pita_db::repositories::ArtworkRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::upload::UploadForm;
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::services::{artwork as service, ensure_collection};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Artwork",
        id,
    })
}

/// GET /admin/artworks
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Artwork>>>> {
    let artworks = ArtworkRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: artworks }))
}

/// POST /admin/artworks
///
/// Multipart upload with a `file` part and optional `title`, `description`,
/// `collection_id`, `created` (YYYY-MM-DD) and `position` fields.
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Artwork>>)> {
    let mut form = UploadForm::read(multipart).await?;
    let upload = form.take_file()?;
    let fields = ArtworkFields {
        title: form.text("title"),
        description: form.text("description"),
        collection_id: form.parse("collection_id")?,
        created: form.parse("created")?,
        position: form.parse::<i64>("position")?.unwrap_or_default(),
    };

    let artwork = service::create_artwork(&state, upload, fields).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: artwork })))
}

/// GET /admin/artworks/{id}
pub async fn get_by_id(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Artwork>>> {
    let artwork = ArtworkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: artwork }))
}

/// PUT /admin/artworks/{id}
///
/// Metadata only; see [`replace_image`] for the file.
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArtwork>,
) -> AppResult<Json<DataResponse<Artwork>>> {
    input.validate()?;
    if let Some(Some(collection_id)) = input.collection_id {
        ensure_collection(&state.pool, collection_id).await?;
    }
    let artwork = ArtworkRepo::update_metadata(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: artwork }))
}

/// PUT /admin/artworks/{id}/image
pub async fn replace_image(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Artwork>>> {
    let upload = UploadForm::read(multipart).await?.take_file()?;
    let artwork = service::replace_artwork_image(&state, id, upload).await?;
    Ok(Json(DataResponse { data: artwork }))
}

/// DELETE /admin/artworks/{id}
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    service::delete_artwork(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
