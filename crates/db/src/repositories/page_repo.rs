//! Repository for the `pages` table.
//!
//! Slugs and rendered markdown are derived here on every save, and position
//! shifts run in the same transaction as the insert or update.

use chrono::Utc;
use sqlx::SqlitePool;
use pita_core::markdown;
use pita_core::page::{PageKind, DISPATCH_ORDER};
use pita_core::slug::slugify;
use pita_core::types::DbId;

use crate::models::page::{CreatePage, NewPageBody, Page, PageBody, PageRow, PageSummary, UpdatePage};
use crate::repositories::position_repo::{Partition, PositionRepo};

/// Column list for pages queries.
const COLUMNS: &str = "id, kind, title, slug, position, description, content, html, link, \
    created_at, updated_at";

/// Display order shared by every page listing.
const ORDER: &str = "ORDER BY position ASC, id DESC";

fn into_page(row: PageRow) -> Result<Page, sqlx::Error> {
    Page::try_from(row).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

fn into_pages(rows: Vec<PageRow>) -> Result<Vec<Page>, sqlx::Error> {
    rows.into_iter().map(into_page).collect()
}

/// Kind-specific column values, in `description, content, html, link` order.
struct BodyColumns {
    description: Option<String>,
    content: Option<String>,
    html: Option<String>,
    link: Option<String>,
}

impl BodyColumns {
    fn from_body(body: &PageBody) -> Self {
        let mut columns = Self {
            description: None,
            content: None,
            html: None,
            link: None,
        };
        match body {
            PageBody::Collection { description } | PageBody::Comic { description } => {
                columns.description = Some(description.clone());
            }
            PageBody::Text { content, html } => {
                columns.content = Some(content.clone());
                columns.html = Some(html.clone());
            }
            PageBody::Redirect { link } => columns.link = Some(link.trim().to_string()),
        }
        columns
    }
}

fn new_body(body: &NewPageBody) -> PageBody {
    match body {
        NewPageBody::Collection { description } => PageBody::Collection {
            description: description.clone(),
        },
        NewPageBody::Text { content } => PageBody::Text {
            content: content.clone(),
            html: markdown::render(content),
        },
        NewPageBody::Redirect { link } => PageBody::Redirect { link: link.clone() },
        NewPageBody::Comic { description } => PageBody::Comic {
            description: description.clone(),
        },
    }
}

/// Apply an update's kind-specific fields to an existing body.
fn updated_body(body: PageBody, input: &UpdatePage) -> PageBody {
    match body {
        PageBody::Collection { description } => PageBody::Collection {
            description: input.description.clone().unwrap_or(description),
        },
        PageBody::Comic { description } => PageBody::Comic {
            description: input.description.clone().unwrap_or(description),
        },
        PageBody::Text { content, .. } => match &input.content {
            Some(content) => PageBody::Text {
                content: content.clone(),
                html: markdown::render(content),
            },
            None => PageBody::Text {
                html: markdown::render(&content),
                content,
            },
        },
        PageBody::Redirect { link } => PageBody::Redirect {
            link: input.link.clone().unwrap_or(link),
        },
    }
}

/// Provides CRUD operations for pages of every kind.
pub struct PageRepo;

impl PageRepo {
    /// Insert a new page, shifting same-kind siblings out of its position.
    ///
    /// The input must already be validated.
    pub async fn create(pool: &SqlitePool, input: &CreatePage) -> Result<Page, sqlx::Error> {
        let kind = input.body.kind();
        let title = input.title.trim();
        let slug = slugify(title);
        let columns = BodyColumns::from_body(&new_body(&input.body));
        let now = Utc::now();

        let mut tx = pool.begin().await?;
        PositionRepo::make_room(&mut tx, Partition::Pages(kind), None, None, input.position)
            .await?;

        let query = format!(
            "INSERT INTO pages
                (kind, title, slug, position, description, content, html, link, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PageRow>(&query)
            .bind(kind.as_str())
            .bind(title)
            .bind(&slug)
            .bind(input.position)
            .bind(&columns.description)
            .bind(&columns.content)
            .bind(&columns.html)
            .bind(&columns.link)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(page_id = row.id, kind = %kind, slug = %slug, "Page created");
        into_page(row)
    }

    /// Find a page by ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = ?1");
        sqlx::query_as::<_, PageRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(into_page)
            .transpose()
    }

    /// Find a page of the given kind by slug.
    pub async fn find_by_slug_and_kind(
        pool: &SqlitePool,
        slug: &str,
        kind: PageKind,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE slug = ?1 AND kind = ?2");
        sqlx::query_as::<_, PageRow>(&query)
            .bind(slug)
            .bind(kind.as_str())
            .fetch_optional(pool)
            .await?
            .map(into_page)
            .transpose()
    }

    /// Resolve a public slug, trying collections, then text pages, then
    /// redirects. Comics live under their own route and never match.
    pub async fn resolve_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Page>, sqlx::Error> {
        for kind in DISPATCH_ORDER {
            if let Some(page) = Self::find_by_slug_and_kind(pool, slug, kind).await? {
                return Ok(Some(page));
            }
        }
        Ok(None)
    }

    /// List every page, grouped by kind and in display order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages ORDER BY kind ASC, position ASC, id DESC");
        let rows = sqlx::query_as::<_, PageRow>(&query).fetch_all(pool).await?;
        into_pages(rows)
    }

    /// List pages of one kind in display order.
    pub async fn list_by_kind(pool: &SqlitePool, kind: PageKind) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE kind = ?1 {ORDER}");
        let rows = sqlx::query_as::<_, PageRow>(&query)
            .bind(kind.as_str())
            .fetch_all(pool)
            .await?;
        into_pages(rows)
    }

    /// Pages shown in the site navigation: collections, text pages and
    /// redirects, interleaved in display order.
    pub async fn list_navigation(pool: &SqlitePool) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pages
             WHERE kind IN ('collection', 'text', 'redirect')
             {ORDER}"
        );
        let rows = sqlx::query_as::<_, PageRow>(&query).fetch_all(pool).await?;
        into_pages(rows)
    }

    /// List every page with the number of artworks it holds.
    pub async fn list_summaries(pool: &SqlitePool) -> Result<Vec<PageSummary>, sqlx::Error> {
        let pages = Self::list(pool).await?;
        let counts: Vec<(DbId, i64)> = sqlx::query_as(
            "SELECT collection_id, COUNT(*) FROM artworks
             WHERE collection_id IS NOT NULL
             GROUP BY collection_id",
        )
        .fetch_all(pool)
        .await?;

        Ok(pages
            .into_iter()
            .map(|page| {
                let artwork_count = counts
                    .iter()
                    .find(|(id, _)| *id == page.id)
                    .map_or(0, |(_, count)| *count);
                PageSummary {
                    page,
                    artwork_count,
                }
            })
            .collect())
    }

    /// Update a page. The slug and rendered HTML are recomputed on every
    /// save. Returns `None` if the page does not exist.
    ///
    /// The input must already be validated against the page's kind.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdatePage,
    ) -> Result<Option<Page>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = ?1");
        let Some(existing) = sqlx::query_as::<_, PageRow>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        let existing = into_page(existing)?;
        let kind = existing.kind();

        let title = input
            .title
            .as_deref()
            .map(str::trim)
            .unwrap_or(existing.title.as_str())
            .to_string();
        let slug = slugify(&title);
        let position = input.position.unwrap_or(existing.position);
        let columns = BodyColumns::from_body(&updated_body(existing.body, input));

        PositionRepo::make_room(
            &mut tx,
            Partition::Pages(kind),
            Some(id),
            Some(existing.position),
            position,
        )
        .await?;

        let query = format!(
            "UPDATE pages SET
                title = ?1, slug = ?2, position = ?3, description = ?4,
                content = ?5, html = ?6, link = ?7, updated_at = ?8
             WHERE id = ?9
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PageRow>(&query)
            .bind(&title)
            .bind(&slug)
            .bind(position)
            .bind(&columns.description)
            .bind(&columns.content)
            .bind(&columns.html)
            .bind(&columns.link)
            .bind(Utc::now())
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(page_id = id, kind = %kind, slug = %slug, "Page updated");
        into_page(row).map(Some)
    }

    /// Delete a page. Artworks of a deleted collection are kept with their
    /// collection cleared; pages of a deleted comic go with it.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pages WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of pages per kind. Kinds without pages are omitted.
    pub async fn count_by_kind(pool: &SqlitePool) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as("SELECT kind, COUNT(*) FROM pages GROUP BY kind ORDER BY kind")
            .fetch_all(pool)
            .await
    }
}
