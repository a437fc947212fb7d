//! Repository for the `comic_pages` table.

use chrono::Utc;
use sqlx::SqlitePool;
use pita_core::types::DbId;

use crate::models::comic_page::{ComicNavigation, ComicPage, NewComicPage};

/// Column list for comic_pages queries.
const COLUMNS: &str = "id, comic_id, number, title, image, width, height, uploaded, \
    created_at, updated_at";

/// Provides CRUD operations for comic pages.
pub struct ComicPageRepo;

impl ComicPageRepo {
    /// Insert a comic page. `uploaded` is set to today.
    pub async fn create(pool: &SqlitePool, input: &NewComicPage) -> Result<ComicPage, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO comic_pages
                (comic_id, number, title, image, width, height, uploaded, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
             RETURNING {COLUMNS}"
        );
        let page = sqlx::query_as::<_, ComicPage>(&query)
            .bind(input.comic_id)
            .bind(input.number)
            .bind(&input.title)
            .bind(&input.image)
            .bind(input.width)
            .bind(input.height)
            .bind(now.date_naive())
            .bind(now)
            .fetch_one(pool)
            .await?;

        tracing::info!(
            comic_id = input.comic_id,
            number = input.number,
            "Comic page created",
        );
        Ok(page)
    }

    /// Find a comic page by ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<ComicPage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comic_pages WHERE id = ?1");
        sqlx::query_as::<_, ComicPage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a page of a comic by its number.
    pub async fn find(
        pool: &SqlitePool,
        comic_id: DbId,
        number: i64,
    ) -> Result<Option<ComicPage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comic_pages WHERE comic_id = ?1 AND number = ?2");
        sqlx::query_as::<_, ComicPage>(&query)
            .bind(comic_id)
            .bind(number)
            .fetch_optional(pool)
            .await
    }

    /// The first page of a comic, if it has any.
    pub async fn first(pool: &SqlitePool, comic_id: DbId) -> Result<Option<ComicPage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comic_pages WHERE comic_id = ?1 ORDER BY number ASC LIMIT 1"
        );
        sqlx::query_as::<_, ComicPage>(&query)
            .bind(comic_id)
            .fetch_optional(pool)
            .await
    }

    /// List a comic's pages in reading order.
    pub async fn list_by_comic(
        pool: &SqlitePool,
        comic_id: DbId,
    ) -> Result<Vec<ComicPage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comic_pages WHERE comic_id = ?1 ORDER BY number ASC");
        sqlx::query_as::<_, ComicPage>(&query)
            .bind(comic_id)
            .fetch_all(pool)
            .await
    }

    /// First, previous, next and last page numbers around `number`.
    /// Page numbers may have gaps; neighbours are the nearest existing pages.
    pub async fn navigation(
        pool: &SqlitePool,
        comic_id: DbId,
        number: i64,
    ) -> Result<ComicNavigation, sqlx::Error> {
        let (first, last): (Option<i64>, Option<i64>) =
            sqlx::query_as("SELECT MIN(number), MAX(number) FROM comic_pages WHERE comic_id = ?1")
                .bind(comic_id)
                .fetch_one(pool)
                .await?;
        let prev: Option<i64> = sqlx::query_scalar(
            "SELECT MAX(number) FROM comic_pages WHERE comic_id = ?1 AND number < ?2",
        )
        .bind(comic_id)
        .bind(number)
        .fetch_one(pool)
        .await?;
        let next: Option<i64> = sqlx::query_scalar(
            "SELECT MIN(number) FROM comic_pages WHERE comic_id = ?1 AND number > ?2",
        )
        .bind(comic_id)
        .bind(number)
        .fetch_one(pool)
        .await?;

        Ok(ComicNavigation {
            first,
            prev,
            next,
            last,
        })
    }

    /// The number a new page appended to the comic would get.
    pub async fn next_number(pool: &SqlitePool, comic_id: DbId) -> Result<i64, sqlx::Error> {
        let max: Option<i64> =
            sqlx::query_scalar("SELECT MAX(number) FROM comic_pages WHERE comic_id = ?1")
                .bind(comic_id)
                .fetch_one(pool)
                .await?;
        Ok(max.unwrap_or(0) + 1)
    }

    /// Delete a comic page, returning the removed row so its image can be
    /// cleaned up.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<Option<ComicPage>, sqlx::Error> {
        let query = format!("DELETE FROM comic_pages WHERE id = ?1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, ComicPage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of comic pages across all comics.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM comic_pages")
            .fetch_one(pool)
            .await
    }
}
