//! Handlers for the front page and slug-addressed pages.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use pita_core::slug::is_valid_slug;
use pita_db::models::page::PageBody;
use pita_db::repositories::{ArtworkRepo, PageRepo};

use crate::error::AppResult;
use crate::handlers::site::{render, SiteContext};
use crate::state::AppState;
use crate::templates;

/// GET /
///
/// Navigation plus every artwork as a thumbnail grid.
pub async fn index(State(state): State<AppState>) -> AppResult<Response> {
    let site = SiteContext::load(&state).await?;
    let artworks = ArtworkRepo::list(&state.pool).await?;
    Ok(render(templates::index(&site.layout(&state), &artworks)).into_response())
}

/// GET /{slug}
///
/// Collections render with their artworks, text pages with their cached
/// HTML, and redirects answer 302 to their link. Anything else is a 404.
pub async fn page(State(state): State<AppState>, Path(slug): Path<String>) -> AppResult<Response> {
    let site = SiteContext::load(&state).await?;
    if !is_valid_slug(&slug) {
        return Ok(site.not_found(&state));
    }
    let Some(page) = PageRepo::resolve_slug(&state.pool, &slug).await? else {
        tracing::debug!(%slug, "No page for slug");
        return Ok(site.not_found(&state));
    };

    let response = match &page.body {
        PageBody::Collection { .. } => {
            let artworks = ArtworkRepo::list_by_collection(&state.pool, page.id).await?;
            render(templates::collection(&site.layout(&state), &page, &artworks)).into_response()
        }
        PageBody::Text { .. } => render(templates::text(&site.layout(&state), &page)).into_response(),
        PageBody::Redirect { link } => {
            (StatusCode::FOUND, [(header::LOCATION, link.as_str())]).into_response()
        }
        PageBody::Comic { .. } => site.not_found(&state),
    };
    Ok(response)
}
