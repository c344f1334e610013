//! Core domain types for the skirmish game.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Width and height of the square board.
pub const BOARD_SIZE: i8 = 5;

/// One of the two player seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Seat {
    /// Seat 1 (moves first).
    One,
    /// Seat 2 (moves second).
    Two,
}

impl Seat {
    /// Returns the opposing seat.
    pub fn opponent(self) -> Self {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// Returns the 1-based seat number used on the wire.
    pub fn number(self) -> u8 {
        match self {
            Seat::One => 1,
            Seat::Two => 2,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Row index (0 is seat 2's back rank).
    pub row: u8,
    /// Column index.
    pub col: u8,
}

impl Cell {
    /// Creates a cell without bounds checking.
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Applies a movement delta, returning `None` when the result leaves the board.
    pub fn offset(self, delta: (i8, i8)) -> Option<Cell> {
        let row = self.row as i8 + delta.0;
        let col = self.col as i8 + delta.1;
        if (0..BOARD_SIZE).contains(&row) && (0..BOARD_SIZE).contains(&col) {
            Some(Cell::new(row as u8, col as u8))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Kind of a piece. Stored explicitly on each piece at creation; never
/// re-derived from the id string during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// Single-step orthogonal mover.
    Pawn,
    /// Orthogonal jumper.
    Hero1,
    /// Diagonal jumper.
    Hero2,
    /// L-shaped jumper.
    Hero3,
}

/// Name of a piece within one seat's catalog.
///
/// Both seats field the same six names; ownership disambiguates (see
/// [`PieceId`]).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
pub enum PieceName {
    /// First pawn.
    P1,
    /// Second pawn.
    P2,
    /// Third pawn.
    P3,
    /// Orthogonal jumper.
    H1,
    /// Diagonal jumper.
    H2,
    /// L-shaped jumper.
    H3,
}

impl PieceName {
    /// Returns the kind this name denotes.
    pub fn kind(self) -> PieceKind {
        match self {
            PieceName::P1 | PieceName::P2 | PieceName::P3 => PieceKind::Pawn,
            PieceName::H1 => PieceKind::Hero1,
            PieceName::H2 => PieceKind::Hero2,
            PieceName::H3 => PieceKind::Hero3,
        }
    }
}

/// Seat-qualified piece identifier.
///
/// The two catalogs share names, so the seat is part of the identity. The
/// wire form is `"<seat>:<name>"`, e.g. `"1:P1"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId {
    /// Owning seat.
    pub seat: Seat,
    /// Name within the seat's catalog.
    pub name: PieceName,
}

impl PieceId {
    /// Creates a seat-qualified id.
    pub fn new(seat: Seat, name: PieceName) -> Self {
        Self { seat, name }
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.seat, self.name)
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Kind, fixed at creation.
    pub kind: PieceKind,
    /// Owning seat.
    pub seat: Seat,
    /// Current cell.
    pub cell: Cell,
}

/// Lifecycle phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Fewer than two seats are filled.
    WaitingForPlayers,
    /// Both seats filled; moves are accepted.
    InProgress,
    /// A win condition fired; immediately replaced by a fresh waiting state.
    Finished,
}

/// Complete game state: the single source of truth.
///
/// Occupancy truth lives in the piece mapping; there is no separate board
/// array. Invariant: at most one piece occupies any cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Pieces currently on the board. Captured pieces are removed entirely.
    pieces: BTreeMap<PieceId, Piece>,
    /// Seat that must move next.
    current_turn: Seat,
    /// Lifecycle phase.
    phase: Phase,
}

impl GameState {
    /// Creates a fresh state with both sides deployed, waiting for players.
    ///
    /// Each seat fields its heroes on the back rank and its pawns in front,
    /// columns 1-3, mirrored across the board.
    pub fn new() -> Self {
        let mut pieces = BTreeMap::new();
        for (seat, hero_row, pawn_row) in [(Seat::One, 4u8, 3u8), (Seat::Two, 0, 1)] {
            let files = [
                (PieceName::H1, hero_row, 1),
                (PieceName::H2, hero_row, 2),
                (PieceName::H3, hero_row, 3),
                (PieceName::P1, pawn_row, 1),
                (PieceName::P2, pawn_row, 2),
                (PieceName::P3, pawn_row, 3),
            ];
            for (name, row, col) in files {
                pieces.insert(
                    PieceId::new(seat, name),
                    Piece {
                        kind: name.kind(),
                        seat,
                        cell: Cell::new(row, col),
                    },
                );
            }
        }
        Self {
            pieces,
            current_turn: Seat::One,
            phase: Phase::WaitingForPlayers,
        }
    }

    /// Creates a state from explicit placements, waiting for players.
    ///
    /// Kinds are fixed from the catalog names at creation. Useful for
    /// replaying or examining mid-game positions; the standard opening comes
    /// from [`GameState::new`].
    pub fn with_pieces(
        placements: impl IntoIterator<Item = (PieceId, Cell)>,
        current_turn: Seat,
    ) -> Self {
        let pieces = placements
            .into_iter()
            .map(|(id, cell)| {
                (
                    id,
                    Piece {
                        kind: id.name.kind(),
                        seat: id.seat,
                        cell,
                    },
                )
            })
            .collect();
        Self {
            pieces,
            current_turn,
            phase: Phase::WaitingForPlayers,
        }
    }

    /// Returns the piece mapping.
    pub fn pieces(&self) -> &BTreeMap<PieceId, Piece> {
        &self.pieces
    }

    /// Returns the seat that must move next.
    pub fn current_turn(&self) -> Seat {
        self.current_turn
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Looks up the piece occupying a cell, if any.
    pub fn occupant(&self, cell: Cell) -> Option<(PieceId, Piece)> {
        self.pieces
            .iter()
            .find(|(_, piece)| piece.cell == cell)
            .map(|(id, piece)| (*id, *piece))
    }

    /// Counts the pieces a seat still has on the board.
    pub fn remaining(&self, seat: Seat) -> usize {
        self.pieces.values().filter(|p| p.seat == seat).count()
    }

    /// Moves a piece and removes the captured occupant, if any
    /// (unchecked - use `Game::apply_move` for validation).
    pub(super) fn commit_move(&mut self, id: PieceId, to: Cell, captured: Option<PieceId>) {
        if let Some(victim) = captured {
            self.pieces.remove(&victim);
        }
        if let Some(piece) = self.pieces.get_mut(&id) {
            piece.cell = to;
        }
    }

    /// Advances the turn to the other seat.
    pub(super) fn advance_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
    }

    /// Sets the lifecycle phase.
    pub(super) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
