//! HTTP tests for artwork and comic page uploads.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, body_text, delete_auth, get, get_auth, login, png, post_json_auth,
    put_json_auth, send_multipart_auth, TestApp,
};
use serde_json::json;
use sqlx::SqlitePool;

async fn create_page(app: &TestApp, token: &str, body: serde_json::Value) -> i64 {
    let response = post_json_auth(app.app(), "/admin/pages", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn upload_artwork(
    app: &TestApp,
    token: &str,
    file: (&str, &[u8]),
    fields: &[(&str, &str)],
) -> axum::response::Response {
    send_multipart_auth(app.app(), Method::POST, "/admin/artworks", token, file, fields).await
}

// ---------------------------------------------------------------------------
// Artworks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_stores_image_and_square_thumbnail(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let token = login(app.app()).await;
    let collection = create_page(&app, &token, json!({ "kind": "collection", "title": "My Show" })).await;

    let response = upload_artwork(
        &app,
        &token,
        ("Sunset.PNG", png(640, 480).as_slice()),
        &[("title", "Sunset"), ("collection_id", collection.to_string().as_str())],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let artwork = body_json(response).await["data"].clone();
    assert_eq!(artwork["image"], "artworks/0001.png");
    assert_eq!(artwork["thumbnail"], "artworks/thumb/0001.jpg");
    assert_eq!(artwork["width"], 640);
    assert_eq!(artwork["height"], 480);
    assert_eq!(artwork["collection_id"], collection);

    assert!(app.media_path("artworks/0001.png").exists());
    let thumb = image::open(app.media_path("artworks/thumb/0001.jpg")).unwrap();
    assert_eq!((thumb.width(), thumb.height()), (400, 400));

    // No temporary files are left behind.
    let leftovers = std::fs::read_dir(app.media_path("artworks"))
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().unwrap().is_file())
        .count();
    assert_eq!(leftovers, 1);

    let html = body_text(get(app.app(), "/my-show").await).await;
    assert!(html.contains(r#"src="/media/artworks/thumb/0001.jpg""#));
    assert!(html.contains(r#"href="/media/artworks/0001.png""#));

    let response = get(app.app(), "/media/artworks/thumb/0001.jpg").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejected_uploads_leave_no_files(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let token = login(app.app()).await;

    let response = upload_artwork(&app, &token, ("notes.txt", b"hello".as_slice()), &[]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = upload_artwork(&app, &token, ("broken.png", b"not really a png".as_slice()), &[]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_IMAGE");

    let text = create_page(&app, &token, json!({ "kind": "text", "title": "About" })).await;
    let response = upload_artwork(
        &app,
        &token,
        ("a.png", png(10, 10).as_slice()),
        &[("collection_id", text.to_string().as_str())],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(!app.media_path("artworks").exists());
    let list = body_json(get_auth(app.app(), "/admin/artworks", &token).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn metadata_update_keeps_files(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let token = login(app.app()).await;
    let collection = create_page(&app, &token, json!({ "kind": "collection", "title": "Drawings" })).await;
    upload_artwork(
        &app,
        &token,
        ("a.png", png(50, 50).as_slice()),
        &[("collection_id", collection.to_string().as_str())],
    )
    .await;

    let response = put_json_auth(
        app.app(),
        "/admin/artworks/1",
        &token,
        json!({ "description": "Ink on paper", "collection_id": null, "created": "2017-11-02" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let artwork = body_json(response).await["data"].clone();
    assert_eq!(artwork["description"], "Ink on paper");
    assert!(artwork["collection_id"].is_null());
    assert_eq!(artwork["created"], "2017-11-02");
    assert_eq!(artwork["image"], "artworks/0001.png");
    assert!(app.media_path("artworks/0001.png").exists());

    let response = put_json_auth(app.app(), "/admin/artworks/99", &token, json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replacing_image_swaps_files(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let token = login(app.app()).await;
    upload_artwork(&app, &token, ("a.png", png(300, 900).as_slice()), &[]).await;

    let response = send_multipart_auth(
        app.app(),
        Method::PUT,
        "/admin/artworks/1/image",
        &token,
        ("b.jpg", png(1200, 800).as_slice()),
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let artwork = body_json(response).await["data"].clone();
    assert_eq!(artwork["image"], "artworks/0001.jpg");
    assert_eq!(artwork["width"], 1200);

    assert!(!app.media_path("artworks/0001.png").exists());
    assert!(app.media_path("artworks/0001.jpg").exists());
    let thumb = image::open(app.media_path("artworks/thumb/0001.jpg")).unwrap();
    assert_eq!((thumb.width(), thumb.height()), (400, 400));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_image_replacement_keeps_live_files(pool: SqlitePool) {
    let app = common::build_test_app(pool.clone());
    let token = login(app.app()).await;
    upload_artwork(&app, &token, ("a.png", png(300, 900).as_slice()), &[]).await;
    let original = std::fs::read(app.media_path("artworks/0001.png")).unwrap();
    let original_thumb = std::fs::read(app.media_path("artworks/thumb/0001.jpg")).unwrap();

    sqlx::query(
        "CREATE TRIGGER freeze_images BEFORE UPDATE OF image ON artworks
         BEGIN SELECT RAISE(ABORT, 'images are frozen'); END",
    )
    .execute(&pool)
    .await
    .unwrap();

    let response = send_multipart_auth(
        app.app(),
        Method::PUT,
        "/admin/artworks/1/image",
        &token,
        ("b.png", png(1200, 800).as_slice()),
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(std::fs::read(app.media_path("artworks/0001.png")).unwrap(), original);
    assert_eq!(
        std::fs::read(app.media_path("artworks/thumb/0001.jpg")).unwrap(),
        original_thumb
    );
    let artwork = body_json(get_auth(app.app(), "/admin/artworks/1", &token).await).await;
    assert_eq!(artwork["data"]["width"], 300);

    // The staged files are gone.
    for dir in ["artworks", "artworks/thumb"] {
        let files = std::fs::read_dir(app.media_path(dir))
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().unwrap().is_file())
            .count();
        assert_eq!(files, 1, "{dir}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_artwork_removes_files(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let token = login(app.app()).await;
    upload_artwork(&app, &token, ("a.png", png(20, 20).as_slice()), &[]).await;

    let response = delete_auth(app.app(), "/admin/artworks/1", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!app.media_path("artworks/0001.png").exists());
    assert!(!app.media_path("artworks/thumb/0001.jpg").exists());

    let response = delete_auth(app.app(), "/admin/artworks/1", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Comics
// ---------------------------------------------------------------------------

async fn upload_comic_page(
    app: &TestApp,
    token: &str,
    comic_id: i64,
    fields: &[(&str, &str)],
) -> axum::response::Response {
    send_multipart_auth(
        app.app(),
        Method::POST,
        &format!("/admin/comics/{comic_id}/pages"),
        token,
        ("page.png", png(60, 90).as_slice()),
        fields,
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn comic_pages_are_numbered_and_navigable(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let token = login(app.app()).await;
    let comic = create_page(&app, &token, json!({ "kind": "comic", "title": "Pita Tales" })).await;

    let first = upload_comic_page(&app, &token, comic, &[("title", "Beginnings")]).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(body_json(first).await["data"]["number"], 1);

    let second = upload_comic_page(&app, &token, comic, &[]).await;
    let second = body_json(second).await["data"].clone();
    assert_eq!(second["number"], 2);
    assert_eq!(second["image"], "comics/pita-tales/2.png");
    assert!(app.media_path("comics/pita-tales/2.png").exists());

    let duplicate = upload_comic_page(&app, &token, comic, &[("number", "2")]).await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let html = body_text(get(app.app(), "/comics/pita-tales").await).await;
    assert!(html.contains("Pita Tales #1: Beginnings"));
    assert!(html.contains(r#"<a href="/comics/pita-tales/2">Next</a>"#));
    assert!(html.contains("<span>Previous</span>"));

    let response = get(app.app(), "/comics/pita-tales/2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<a href="/comics/pita-tales/1">Previous</a>"#));
    assert!(html.contains("<span>Next</span>"));

    assert_eq!(
        get(app.app(), "/comics/pita-tales/3").await.status(),
        StatusCode::NOT_FOUND
    );

    let list = body_json(
        get_auth(app.app(), &format!("/admin/comics/{comic}/pages"), &token).await,
    )
    .await;
    assert_eq!(list["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn comic_page_upload_requires_a_comic(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let token = login(app.app()).await;
    let collection = create_page(&app, &token, json!({ "kind": "collection", "title": "Prints" })).await;

    let response = upload_comic_page(&app, &token, collection, &[]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = upload_comic_page(&app, &token, collection, &[("number", "0")]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_comic_removes_page_files(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let token = login(app.app()).await;
    let comic = create_page(&app, &token, json!({ "kind": "comic", "title": "Strips" })).await;
    upload_comic_page(&app, &token, comic, &[]).await;
    let second = body_json(upload_comic_page(&app, &token, comic, &[]).await).await;
    let second_id = second["data"]["id"].as_i64().unwrap();

    let response = delete_auth(app.app(), &format!("/admin/comic-pages/{second_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!app.media_path("comics/strips/2.png").exists());
    assert!(app.media_path("comics/strips/1.png").exists());

    let response = delete_auth(app.app(), &format!("/admin/pages/{comic}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!app.media_path("comics/strips/1.png").exists());

    let dashboard = body_json(get_auth(app.app(), "/admin/", &token).await).await;
    assert_eq!(dashboard["data"]["comic_pages"], 0);
}
