mod action;
mod movement;
mod rules;
mod types;

pub use action::{MoveError, MoveOutcome};
pub use movement::{Delta, Direction, move_delta};
pub use rules::Game;
pub use types::{BOARD_SIZE, Cell, GameState, Phase, Piece, PieceId, PieceKind, PieceName, Seat};
