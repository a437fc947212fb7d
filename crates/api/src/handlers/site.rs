//! Shared loading for the public HTML views.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use maud::Markup;
use pita_core::page::PageKind;
use pita_core::settings::SiteSettings;
use pita_db::models::page::Page;
use pita_db::repositories::{PageRepo, SettingRepo};

use crate::error::AppResult;
use crate::state::AppState;
use crate::templates::{self, Layout};

/// Per-request data behind the page chrome.
pub struct SiteContext {
    pub settings: SiteSettings,
    pub nav: Vec<Page>,
    pub has_comics: bool,
}

impl SiteContext {
    pub async fn load(state: &AppState) -> AppResult<Self> {
        let settings = SettingRepo::load(&state.pool).await?;
        let nav = PageRepo::list_navigation(&state.pool).await?;
        let has_comics = !PageRepo::list_by_kind(&state.pool, PageKind::Comic)
            .await?
            .is_empty();
        Ok(Self {
            settings,
            nav,
            has_comics,
        })
    }

    pub fn layout<'a>(&'a self, state: &'a AppState) -> Layout<'a> {
        Layout {
            settings: &self.settings,
            nav: &self.nav,
            has_comics: self.has_comics,
            media: &state.media,
        }
    }

    /// The HTML 404 page.
    pub fn not_found(&self, state: &AppState) -> Response {
        (
            StatusCode::NOT_FOUND,
            render(templates::not_found(&self.layout(state))),
        )
            .into_response()
    }
}

pub fn render(markup: Markup) -> Html<String> {
    Html(markup.into_string())
}
