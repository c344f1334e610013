//! First-class move events and the rejection taxonomy.
//!
//! A move request is ephemeral input scoped to one request/response cycle.
//! Outcomes and errors are domain events the session layer turns into wire
//! messages.

use super::types::{Cell, PieceId, Seat};

/// Result of a successfully applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece moved (possibly capturing); the game continues with the
    /// other seat to move.
    Moved {
        /// The piece that moved.
        piece: PieceId,
        /// Destination cell.
        to: Cell,
        /// Opposing piece removed from the board, if any.
        captured: Option<PieceId>,
    },
    /// The move captured the opponent's last piece; the game is over.
    Won {
        /// Seat declared winner.
        winner: Seat,
    },
}

/// Why a move was rejected. Every rejection is request-scoped, non-fatal,
/// and leaves the game state untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The game has not started or has already finished.
    #[display("Game is not in progress")]
    NotInProgress,

    /// The requesting seat is not the seat to move.
    #[display("Not your turn")]
    NotYourTurn,

    /// The piece id does not resolve to one of the requester's pieces still
    /// on the board.
    #[display("No such piece on the board: {_0}")]
    UnknownOrInactivePiece(String),

    /// The direction token is undefined for this piece's kind.
    #[display("Piece cannot move in direction {_0}")]
    IllegalDirection(String),

    /// The destination lies outside the board.
    #[display("Destination is off the board")]
    OutOfBounds,

    /// The destination holds a piece of the same kind, or one of the
    /// requester's own pieces.
    #[display("Destination cell is blocked")]
    IllegalDestination,
}

impl std::error::Error for MoveError {}
