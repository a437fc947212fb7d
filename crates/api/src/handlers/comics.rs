//! Handlers for the public comic reader.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use pita_core::page::PageKind;
use pita_db::models::page::Page;
use pita_db::repositories::{ComicPageRepo, PageRepo};

use crate::error::AppResult;
use crate::handlers::site::{render, SiteContext};
use crate::state::AppState;
use crate::templates;

/// GET /comics/
pub async fn list(State(state): State<AppState>) -> AppResult<Response> {
    let site = SiteContext::load(&state).await?;
    let comics = PageRepo::list_by_kind(&state.pool, PageKind::Comic).await?;
    Ok(render(templates::comics(&site.layout(&state), &comics)).into_response())
}

/// GET /comics/{slug}
///
/// Shows the first page. A comic without pages is a 404.
pub async fn first_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let site = SiteContext::load(&state).await?;
    let Some(comic) = find_comic(&state, &slug).await? else {
        return Ok(site.not_found(&state));
    };
    let Some(first) = ComicPageRepo::first(&state.pool, comic.id).await? else {
        return Ok(site.not_found(&state));
    };
    show(&state, &site, &comic, first.number).await
}

/// GET /comics/{slug}/{number}
///
/// A number that does not parse is a 404 like any other missing page.
pub async fn page(
    State(state): State<AppState>,
    Path((slug, number)): Path<(String, String)>,
) -> AppResult<Response> {
    let site = SiteContext::load(&state).await?;
    let Ok(number) = number.parse::<i64>() else {
        return Ok(site.not_found(&state));
    };
    let Some(comic) = find_comic(&state, &slug).await? else {
        return Ok(site.not_found(&state));
    };
    show(&state, &site, &comic, number).await
}

async fn find_comic(state: &AppState, slug: &str) -> AppResult<Option<Page>> {
    Ok(PageRepo::find_by_slug_and_kind(&state.pool, slug, PageKind::Comic).await?)
}

async fn show(
    state: &AppState,
    site: &SiteContext,
    comic: &Page,
    number: i64,
) -> AppResult<Response> {
    let Some(page) = ComicPageRepo::find(&state.pool, comic.id, number).await? else {
        return Ok(site.not_found(state));
    };
    let navigation = ComicPageRepo::navigation(&state.pool, comic.id, number).await?;
    Ok(render(templates::comic_page(
        &site.layout(state),
        comic,
        &page,
        &navigation,
    ))
    .into_response())
}
