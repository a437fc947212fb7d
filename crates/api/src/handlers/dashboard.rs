//! Handler for the admin dashboard.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use pita_core::page::PageKind;
use pita_db::repositories::{ArtworkRepo, ComicPageRepo, PageRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Content counts shown on the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardCounts {
    /// Pages per kind, including kinds with no pages.
    pub pages: BTreeMap<&'static str, i64>,
    pub artworks: i64,
    pub comic_pages: i64,
}

/// GET /admin/
pub async fn dashboard(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardCounts>>> {
    let mut pages: BTreeMap<&'static str, i64> =
        PageKind::ALL.iter().map(|kind| (kind.as_str(), 0)).collect();
    for (name, count) in PageRepo::count_by_kind(&state.pool).await? {
        if let Ok(kind) = PageKind::from_name(&name) {
            pages.insert(kind.as_str(), count);
        }
    }

    Ok(Json(DataResponse {
        data: DashboardCounts {
            pages,
            artworks: ArtworkRepo::count(&state.pool).await?,
            comic_pages: ComicPageRepo::count(&state.pool).await?,
        },
    }))
}
