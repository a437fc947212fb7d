//! HTTP tests for the public HTML views and slug dispatch.

mod common;

use axum::http::{header, StatusCode};
use common::{body_text, get, login, post_json_auth};
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn index_renders_site_chrome(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app.app(), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<title>Art by Peter Sang</title>"));
    assert!(html.contains("© 2018 Peter Sang"));
    assert!(html.contains(r#"href="/contact/""#));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_slug_is_404(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = get(app.app(), "/no-such-page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page not found"));

    let response = get(app.app(), "/Not_A_Slug").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn collection_is_served_at_its_slug(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let token = login(app.app()).await;

    let response = post_json_auth(
        app.app(),
        "/admin/pages",
        &token,
        json!({ "kind": "collection", "title": "My Show", "description": "Paintings from 2018" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app.app(), "/my-show").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h2>My Show</h2>"));
    assert!(html.contains("Paintings from 2018"));
    assert!(html.contains(r#"<a href="/my-show">My Show</a>"#), "collection is in the nav");

    let response = get(app.app(), "/my-show/").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn text_page_renders_markdown(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let token = login(app.app()).await;

    post_json_auth(
        app.app(),
        "/admin/pages",
        &token,
        json!({ "kind": "text", "title": "About", "content": "Hello *world*" }),
    )
    .await;

    let html = body_text(get(app.app(), "/about").await).await;
    assert!(html.contains("<em>world</em>"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn redirect_page_answers_302(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let token = login(app.app()).await;

    let response = post_json_auth(
        app.app(),
        "/admin/pages",
        &token,
        json!({ "kind": "redirect", "title": "Shop", "link": "https://shop.example.com/" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app.app(), "/shop").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://shop.example.com/"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn comics_are_not_dispatched_by_bare_slug(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let token = login(app.app()).await;

    post_json_auth(
        app.app(),
        "/admin/pages",
        &token,
        json!({ "kind": "comic", "title": "Pita Tales" }),
    )
    .await;

    assert_eq!(get(app.app(), "/pita-tales").await.status(), StatusCode::NOT_FOUND);

    let response = get(app.app(), "/comics/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"href="/comics/pita-tales""#));

    // No pages uploaded yet.
    assert_eq!(
        get(app.app(), "/comics/pita-tales").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_comic_page_is_html_404(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let token = login(app.app()).await;

    post_json_auth(
        app.app(),
        "/admin/pages",
        &token,
        json!({ "kind": "comic", "title": "Pita Tales" }),
    )
    .await;

    for uri in ["/comics/pita-tales/abc", "/comics/pita-tales/1.5", "/comics/missing/abc"] {
        let response = get(app.app(), uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"), "{uri}: {content_type}");
        assert!(body_text(response).await.contains("Page not found"), "{uri}");
    }
}
