//! Manual display-order maintenance.
//!
//! Pages (per kind) and artworks carry an integer `position`. When a row is
//! saved into a position another sibling already occupies, every sibling at
//! or above that position moves up so the saved row gets the slot to itself.
//! This module only plans the move; the repositories apply it inside the
//! transaction of the triggering write.

use crate::error::CoreError;
use crate::types::DbId;

/// A row of the sibling set as seen before the save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sibling {
    pub id: DbId,
    pub position: i64,
}

/// A single position change produced by [`plan_shift`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub id: DbId,
    pub position: i64,
}

/// Plan the sibling moves needed to save a row at `target`.
///
/// * `siblings`: the row's partition (same table / same page kind). May or
///   may not contain the row itself; it is skipped via `saving`.
/// * `saving`: id of the row being saved, `None` for an insert.
/// * `current`: the row's stored position, `None` for an insert.
///
/// Returns an empty plan when the position did not change or nothing sits at
/// `target`. Otherwise siblings at or above `target` are shifted up by one,
/// in display order (position, then newest first), and pushed further only
/// when needed to clear a sibling already moved. Pre-existing duplicates at
/// or above `target` are separated in the process.
///
/// Fails with [`CoreError::Validation`] when a shifted position would not
/// fit in an `i64`.
pub fn plan_shift(
    siblings: &[Sibling],
    saving: Option<DbId>,
    current: Option<i64>,
    target: i64,
) -> Result<Vec<Move>, CoreError> {
    if current == Some(target) {
        return Ok(Vec::new());
    }

    let others = siblings.iter().filter(|s| Some(s.id) != saving);

    if !others.clone().any(|s| s.position == target) {
        return Ok(Vec::new());
    }

    let mut affected: Vec<Sibling> = others.filter(|s| s.position >= target).copied().collect();
    affected.sort_by(|a, b| a.position.cmp(&b.position).then(b.id.cmp(&a.id)));

    let mut moves = Vec::with_capacity(affected.len());
    let mut floor = target;
    for sibling in affected {
        let position = sibling
            .position
            .max(floor)
            .checked_add(1)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Position {target} leaves no room to shift the rows after it"
                ))
            })?;
        floor = position;
        moves.push(Move {
            id: sibling.id,
            position,
        });
    }
    Ok(moves)
}
