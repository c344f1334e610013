//! Skirmish Games library - authoritative two-player game engine
//!
//! # Architecture
//!
//! - **Games**: pure game logic (movement rule table, state machine)
//! - **Session**: the game room, seating and event dispatch
//! - **Protocol**: JSON wire messages
//! - **Server**: axum WebSocket transport
//!
//! # Example
//!
//! ```
//! use skirmish_games::{Game, MoveOutcome, Seat};
//!
//! let mut game = Game::new();
//! game.start();
//! let outcome = game.apply_move(Seat::One, "P1", "F")?;
//! assert!(matches!(outcome, MoveOutcome::Moved { .. }));
//! # Ok::<(), skirmish_games::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod games;
mod protocol;
mod server;
mod session;

// Crate-level exports - Game types (skirmish)
pub use games::skirmish::{
    BOARD_SIZE, Cell, Delta, Direction, Game, GameState, MoveError, MoveOutcome, Phase, Piece,
    PieceId, PieceKind, PieceName, Seat, move_delta,
};

// Crate-level exports - Wire protocol
pub use protocol::{MoveRequest, ServerMessage};

// Crate-level exports - Server transport
pub use server::{router, serve};

// Crate-level exports - Session management
pub use session::{ConnectionId, GameFull, Participant, Room, Seating};
