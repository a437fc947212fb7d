use std::collections::HashSet;

use sqlx::SqlitePool;
use pita_core::page::PageKind;
use pita_db::models::page::{CreatePage, NewPageBody, PageBody, UpdatePage};
use pita_db::repositories::PageRepo;

fn collection(title: &str, position: i64) -> CreatePage {
    CreatePage {
        title: title.to_string(),
        position,
        body: NewPageBody::Collection {
            description: format!("{title} description"),
        },
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap(pool: SqlitePool) {
    pita_db::health_check(&pool).await.unwrap();
    for table in ["pages", "artworks", "comic_pages", "site_settings"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_derives_slug(pool: SqlitePool) {
    let page = PageRepo::create(&pool, &collection("My Show", 0)).await.unwrap();
    assert_eq!(page.slug, "my-show");
    assert_eq!(page.kind(), PageKind::Collection);
    assert_eq!(page.description(), "My Show description");

    let found = PageRepo::find_by_slug_and_kind(&pool, "my-show", PageKind::Collection)
        .await
        .unwrap()
        .expect("page should exist");
    assert_eq!(found.id, page.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_text_page_renders_markdown(pool: SqlitePool) {
    let input = CreatePage {
        title: "About".into(),
        position: 0,
        body: NewPageBody::Text {
            content: "# Hello\n\nSome *text*.".into(),
        },
    };
    let page = PageRepo::create(&pool, &input).await.unwrap();
    let PageBody::Text { html, .. } = &page.body else {
        panic!("expected a text page, got {:?}", page.body);
    };
    assert!(html.contains("<h1>Hello</h1>"));
    assert!(html.contains("<em>text</em>"));

    let update = UpdatePage {
        content: Some("Updated **bold**".into()),
        ..Default::default()
    };
    let page = PageRepo::update(&pool, page.id, &update).await.unwrap().unwrap();
    let PageBody::Text { html, .. } = &page.body else {
        panic!("expected a text page");
    };
    assert!(html.contains("<strong>bold</strong>"));
    assert!(!html.contains("Hello"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_recomputes_slug(pool: SqlitePool) {
    let page = PageRepo::create(&pool, &collection("Old Name", 0)).await.unwrap();

    let unchanged = PageRepo::update(
        &pool,
        page.id,
        &UpdatePage {
            description: Some("new description".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(unchanged.slug, "old-name");
    assert_eq!(unchanged.description(), "new description");

    let renamed = PageRepo::update(
        &pool,
        page.id,
        &UpdatePage {
            title: Some("New Name".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.slug, "new-name");
    assert!(PageRepo::resolve_slug(&pool, "old-name").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_page_returns_none(pool: SqlitePool) {
    let result = PageRepo::update(&pool, 999, &UpdatePage::default()).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_title_violates_unique(pool: SqlitePool) {
    PageRepo::create(&pool, &collection("Prints", 0)).await.unwrap();
    let err = PageRepo::create(&pool, &collection("Prints", 1)).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert!(db_err.is_unique_violation());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_conflicting_position_shifts_siblings(pool: SqlitePool) {
    let a = PageRepo::create(&pool, &collection("A", 0)).await.unwrap();
    let b = PageRepo::create(&pool, &collection("B", 1)).await.unwrap();
    let c = PageRepo::create(&pool, &collection("C", 0)).await.unwrap();

    let pages = PageRepo::list_by_kind(&pool, PageKind::Collection).await.unwrap();
    let ids: Vec<_> = pages.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![c.id, a.id, b.id]);

    let positions: HashSet<_> = pages.iter().map(|p| p.position).collect();
    assert_eq!(positions.len(), pages.len(), "positions must be unique");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_position_shift_is_per_kind(pool: SqlitePool) {
    let collection_page = PageRepo::create(&pool, &collection("Gallery", 0)).await.unwrap();
    let text = CreatePage {
        title: "Bio".into(),
        position: 0,
        body: NewPageBody::Text {
            content: String::new(),
        },
    };
    PageRepo::create(&pool, &text).await.unwrap();

    let reloaded = PageRepo::find_by_id(&pool, collection_page.id).await.unwrap().unwrap();
    assert_eq!(reloaded.position, 0, "other kinds are not shifted");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resave_same_position_is_noop(pool: SqlitePool) {
    let a = PageRepo::create(&pool, &collection("A", 0)).await.unwrap();
    let b = PageRepo::create(&pool, &collection("B", 1)).await.unwrap();

    let update = UpdatePage {
        position: Some(0),
        description: Some("edited".into()),
        ..Default::default()
    };
    PageRepo::update(&pool, a.id, &update).await.unwrap();

    let b = PageRepo::find_by_id(&pool, b.id).await.unwrap().unwrap();
    assert_eq!(b.position, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resolve_slug_follows_dispatch_order(pool: SqlitePool) {
    let redirect = CreatePage {
        title: "Shop".into(),
        position: 0,
        body: NewPageBody::Redirect {
            link: "https://shop.example.com".into(),
        },
    };
    PageRepo::create(&pool, &redirect).await.unwrap();
    let comic = CreatePage {
        title: "Strips".into(),
        position: 0,
        body: NewPageBody::Comic {
            description: String::new(),
        },
    };
    PageRepo::create(&pool, &comic).await.unwrap();

    let shop = PageRepo::resolve_slug(&pool, "shop").await.unwrap().unwrap();
    assert_eq!(
        shop.body,
        PageBody::Redirect {
            link: "https://shop.example.com".into()
        }
    );
    assert!(PageRepo::resolve_slug(&pool, "strips").await.unwrap().is_none());
    assert!(PageRepo::resolve_slug(&pool, "missing").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_navigation_excludes_comics(pool: SqlitePool) {
    PageRepo::create(&pool, &collection("Paintings", 1)).await.unwrap();
    let text = CreatePage {
        title: "About".into(),
        position: 0,
        body: NewPageBody::Text {
            content: String::new(),
        },
    };
    PageRepo::create(&pool, &text).await.unwrap();
    let comic = CreatePage {
        title: "Strips".into(),
        position: 0,
        body: NewPageBody::Comic {
            description: String::new(),
        },
    };
    PageRepo::create(&pool, &comic).await.unwrap();

    let nav = PageRepo::list_navigation(&pool).await.unwrap();
    let slugs: Vec<_> = nav.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["about", "paintings"]);

    let counts = PageRepo::count_by_kind(&pool).await.unwrap();
    assert_eq!(
        counts,
        vec![
            ("collection".to_string(), 1),
            ("comic".to_string(), 1),
            ("text".to_string(), 1)
        ]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete(pool: SqlitePool) {
    let page = PageRepo::create(&pool, &collection("Temp", 0)).await.unwrap();
    assert!(PageRepo::delete(&pool, page.id).await.unwrap());
    assert!(!PageRepo::delete(&pool, page.id).await.unwrap());
    assert!(PageRepo::find_by_id(&pool, page.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_shift_at_maximum_position(pool: SqlitePool) {
    let max = pita_core::page::MAX_POSITION;
    let first = PageRepo::create(&pool, &collection("First", max)).await.unwrap();
    let second = PageRepo::create(&pool, &collection("Second", max)).await.unwrap();

    let first = PageRepo::find_by_id(&pool, first.id).await.unwrap().unwrap();
    assert_eq!(second.position, max);
    assert_eq!(first.position, max + 1);
}
