//! Repository for the `artworks` table.
//!
//! Inserts and image replacements take an open transaction so the service
//! can move the stored files into place before committing.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use pita_core::types::DbId;

use crate::models::artwork::{Artwork, ArtworkImage, NewArtwork, UpdateArtwork};
use crate::repositories::position_repo::{Partition, PositionRepo};

/// Column list for artworks queries.
const COLUMNS: &str = "id, image, thumbnail, width, height, title, description, collection_id, \
    uploaded, created, position, created_at, updated_at";

/// Provides CRUD operations for artworks.
pub struct ArtworkRepo;

impl ArtworkRepo {
    /// Insert an artwork inside `tx`, shifting siblings out of its position.
    /// `uploaded` is set to today.
    pub async fn insert(
        tx: &mut Transaction<'_, Sqlite>,
        input: &NewArtwork,
    ) -> Result<Artwork, sqlx::Error> {
        let fields = &input.fields;
        PositionRepo::make_room(tx, Partition::Artworks, None, None, fields.position).await?;

        let now = Utc::now();
        let query = format!(
            "INSERT INTO artworks
                (image, thumbnail, width, height, title, description, collection_id,
                 uploaded, created, position, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(&input.image)
            .bind(&input.thumbnail)
            .bind(input.width)
            .bind(input.height)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(fields.collection_id)
            .bind(now.date_naive())
            .bind(fields.created)
            .bind(fields.position)
            .bind(now)
            .fetch_one(&mut **tx)
            .await
    }

    /// Persist new storage keys for an artwork's image and thumbnail.
    pub async fn set_files(
        tx: &mut Transaction<'_, Sqlite>,
        id: DbId,
        image: &str,
        thumbnail: &str,
    ) -> Result<Artwork, sqlx::Error> {
        let query = format!(
            "UPDATE artworks SET image = ?1, thumbnail = ?2, updated_at = ?3
             WHERE id = ?4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(image)
            .bind(thumbnail)
            .bind(Utc::now())
            .bind(id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find an artwork by ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artworks WHERE id = ?1");
        sqlx::query_as::<_, Artwork>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all artworks in display order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Artwork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artworks ORDER BY position ASC, id DESC");
        sqlx::query_as::<_, Artwork>(&query).fetch_all(pool).await
    }

    /// List the artworks of a collection in display order.
    pub async fn list_by_collection(
        pool: &SqlitePool,
        collection_id: DbId,
    ) -> Result<Vec<Artwork>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artworks
             WHERE collection_id = ?1
             ORDER BY position ASC, id DESC"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(collection_id)
            .fetch_all(pool)
            .await
    }

    /// Update artwork metadata. Files are never touched here.
    ///
    /// Returns `None` if the artwork does not exist.
    pub async fn update_metadata(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateArtwork,
    ) -> Result<Option<Artwork>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM artworks WHERE id = ?1");
        let Some(existing) = sqlx::query_as::<_, Artwork>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let position = input.position.unwrap_or(existing.position);
        PositionRepo::make_room(
            &mut tx,
            Partition::Artworks,
            Some(id),
            Some(existing.position),
            position,
        )
        .await?;

        let query = format!(
            "UPDATE artworks SET
                title = ?1, description = ?2, collection_id = ?3, created = ?4,
                position = ?5, updated_at = ?6
             WHERE id = ?7
             RETURNING {COLUMNS}"
        );
        let artwork = sqlx::query_as::<_, Artwork>(&query)
            .bind(input.title.as_ref().unwrap_or(&existing.title))
            .bind(input.description.as_ref().unwrap_or(&existing.description))
            .bind(input.collection_id.unwrap_or(existing.collection_id))
            .bind(input.created.unwrap_or(existing.created))
            .bind(position)
            .bind(Utc::now())
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(artwork_id = id, position, "Artwork updated");
        Ok(Some(artwork))
    }

    /// Point an artwork at a new image and thumbnail inside `tx`.
    ///
    /// Returns `None` if the artwork does not exist.
    pub async fn replace_image(
        tx: &mut Transaction<'_, Sqlite>,
        id: DbId,
        image: &ArtworkImage,
    ) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!(
            "UPDATE artworks SET
                image = ?1, thumbnail = ?2, width = ?3, height = ?4, updated_at = ?5
             WHERE id = ?6
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(&image.image)
            .bind(&image.thumbnail)
            .bind(image.width)
            .bind(image.height)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Delete an artwork, returning the removed row so its files can be
    /// cleaned up.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!("DELETE FROM artworks WHERE id = ?1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Artwork>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of artworks.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM artworks")
            .fetch_one(pool)
            .await
    }
}
