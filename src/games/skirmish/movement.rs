//! Movement rule table: (piece kind, direction) -> (row delta, column delta).
//!
//! Pure and total over the finite domain; never consults board state. All
//! bounds and occupancy checks belong to the game engine in `rules`.

use super::types::PieceKind;
use serde::{Deserialize, Serialize};

/// A row/column displacement for a single move.
pub type Delta = (i8, i8);

/// Direction token selecting one entry in the rule table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
pub enum Direction {
    /// Forward.
    F,
    /// Back.
    B,
    /// Left.
    L,
    /// Right.
    R,
    /// Forward-left.
    FL,
    /// Forward-right.
    FR,
    /// Back-left.
    BL,
    /// Back-right.
    BR,
}

/// Returns the displacement for a piece kind moving in a direction, or `None`
/// when the pair is undefined.
///
/// Callers must treat `None` as an illegal move, never as a no-op. The pawn
/// steps one cell orthogonally. `Hero1` jumps two cells on an axis-swapped
/// orthogonal table: `L`/`R` displace rows, `F`/`B` displace columns.
/// `Hero2` jumps two cells diagonally; `Hero3` makes a knight-like L jump of
/// two rows and one column.
pub fn move_delta(kind: PieceKind, direction: Direction) -> Option<Delta> {
    use Direction::*;
    match (kind, direction) {
        (PieceKind::Pawn, F) => Some((-1, 0)),
        (PieceKind::Pawn, B) => Some((1, 0)),
        (PieceKind::Pawn, L) => Some((0, -1)),
        (PieceKind::Pawn, R) => Some((0, 1)),
        (PieceKind::Hero1, F) => Some((0, -2)),
        (PieceKind::Hero1, B) => Some((0, 2)),
        (PieceKind::Hero1, L) => Some((-2, 0)),
        (PieceKind::Hero1, R) => Some((2, 0)),
        (PieceKind::Hero2, FL) => Some((-2, -2)),
        (PieceKind::Hero2, FR) => Some((-2, 2)),
        (PieceKind::Hero2, BL) => Some((2, -2)),
        (PieceKind::Hero2, BR) => Some((2, 2)),
        (PieceKind::Hero3, FL) => Some((-2, -1)),
        (PieceKind::Hero3, FR) => Some((-2, 1)),
        (PieceKind::Hero3, BL) => Some((2, -1)),
        (PieceKind::Hero3, BR) => Some((2, 1)),
        _ => None,
    }
}
