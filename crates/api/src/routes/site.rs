//! Route definitions for the public site.

use axum::routing::get;
use axum::Router;

use crate::handlers::{comics, contact, views};
use crate::state::AppState;

/// Public HTML routes. Each page route also answers with a trailing slash.
///
/// ```text
/// GET       /                        index
/// GET, POST /contact/                contact form
/// GET       /comics/                 comic list
/// GET       /comics/{slug}           first page of a comic
/// GET       /comics/{slug}/{number}  one page of a comic
/// GET       /{slug}                  collection, text page or redirect
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(views::index))
        .route("/contact", get(contact::show).post(contact::submit))
        .route("/contact/", get(contact::show).post(contact::submit))
        .route("/comics", get(comics::list))
        .route("/comics/", get(comics::list))
        .route("/comics/{slug}", get(comics::first_page))
        .route("/comics/{slug}/", get(comics::first_page))
        .route("/comics/{slug}/{number}", get(comics::page))
        .route("/{slug}", get(views::page))
        .route("/{slug}/", get(views::page))
}
