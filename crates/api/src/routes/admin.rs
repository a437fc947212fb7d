//! Route definitions for the `/admin` JSON API.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{artworks, auth, comic_pages, dashboard, pages, settings};
use crate::state::AppState;

/// Admin routes. Everything except `/admin/login` requires an admin Bearer
/// token. Paths below are relative to `/admin`.
///
/// ```text
/// POST               /login                 login
/// GET                /                      dashboard counts
/// GET, POST          /pages                 list, create
/// GET, PUT, DELETE   /pages/{id}            get, update, delete
/// GET, POST          /artworks              list, upload (multipart)
/// GET, PUT, DELETE   /artworks/{id}         get, update metadata, delete
/// PUT                /artworks/{id}/image   replace image (multipart)
/// GET, POST          /comics/{id}/pages     list, upload (multipart)
/// DELETE             /comic-pages/{id}      delete
/// GET, PUT           /settings              list, update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(auth::login))
        .route("/admin", get(dashboard::dashboard))
        .route("/admin/", get(dashboard::dashboard))
        .route("/admin/pages", get(pages::list).post(pages::create))
        .route(
            "/admin/pages/{id}",
            get(pages::get_by_id).put(pages::update).delete(pages::delete),
        )
        .route("/admin/artworks", get(artworks::list).post(artworks::create))
        .route(
            "/admin/artworks/{id}",
            get(artworks::get_by_id)
                .put(artworks::update)
                .delete(artworks::delete),
        )
        .route("/admin/artworks/{id}/image", put(artworks::replace_image))
        .route(
            "/admin/comics/{comic_id}/pages",
            get(comic_pages::list_by_comic).post(comic_pages::create),
        )
        .route("/admin/comic-pages/{id}", delete(comic_pages::delete))
        .route("/admin/settings", get(settings::list).put(settings::update))
}
