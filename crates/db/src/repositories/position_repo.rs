//! Sibling position shifts for pages and artworks.
//!
//! Always called with the open transaction of the write that triggered it,
//! so the shift and the save commit or roll back together.

use sqlx::{Sqlite, Transaction};
use pita_core::page::PageKind;
use pita_core::position::{plan_shift, Sibling};
use pita_core::types::DbId;

/// A set of rows whose positions are maintained together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Pages of a single kind.
    Pages(PageKind),
    Artworks,
}

#[derive(sqlx::FromRow)]
struct SiblingRow {
    id: DbId,
    position: i64,
}

pub struct PositionRepo;

impl PositionRepo {
    /// Make room at `target` for the row being saved.
    ///
    /// `saving`/`current` are the id and stored position of an existing row,
    /// `None` for inserts. Returns the number of siblings moved.
    pub async fn make_room(
        tx: &mut Transaction<'_, Sqlite>,
        partition: Partition,
        saving: Option<DbId>,
        current: Option<i64>,
        target: i64,
    ) -> Result<usize, sqlx::Error> {
        if current == Some(target) {
            return Ok(0);
        }

        let rows = match partition {
            Partition::Pages(kind) => {
                sqlx::query_as::<_, SiblingRow>(
                    "SELECT id, position FROM pages WHERE kind = ?1 AND position >= ?2",
                )
                .bind(kind.as_str())
                .bind(target)
                .fetch_all(&mut **tx)
                .await?
            }
            Partition::Artworks => {
                sqlx::query_as::<_, SiblingRow>(
                    "SELECT id, position FROM artworks WHERE position >= ?1",
                )
                .bind(target)
                .fetch_all(&mut **tx)
                .await?
            }
        };

        let siblings: Vec<Sibling> = rows
            .into_iter()
            .map(|r| Sibling {
                id: r.id,
                position: r.position,
            })
            .collect();
        let moves = plan_shift(&siblings, saving, current, target)
            .map_err(|e| sqlx::Error::Protocol(e.to_string()))?;
        if moves.is_empty() {
            return Ok(0);
        }

        let query = match partition {
            Partition::Pages(_) => "UPDATE pages SET position = ?1 WHERE id = ?2",
            Partition::Artworks => "UPDATE artworks SET position = ?1 WHERE id = ?2",
        };
        for m in &moves {
            sqlx::query(query)
                .bind(m.position)
                .bind(m.id)
                .execute(&mut **tx)
                .await?;
        }

        tracing::debug!(
            ?partition,
            target,
            moved = moves.len(),
            "Shifted sibling positions",
        );
        Ok(moves.len())
    }
}
