//! Game engine: validation, mutation, turn advancement, win detection.

use super::action::{MoveError, MoveOutcome};
use super::movement::{Direction, move_delta};
use super::types::{GameState, Phase, PieceId, PieceName, Seat};
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// Skirmish game engine.
///
/// Exclusively owns the one [`GameState`]; all mutation goes through
/// [`Game::apply_move`]. Validation is fully evaluated before any mutation,
/// so a rejected move leaves the state untouched.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Creates a new game waiting for players.
    #[instrument]
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    /// Creates an engine over an explicit state.
    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Marks the game in progress once both seats are filled.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        info!("Both seats filled, game starting");
        self.state.set_phase(Phase::InProgress);
    }

    /// Applies a move for the given seat.
    ///
    /// `piece_id` is the unqualified catalog name (e.g. `"P1"`), resolved
    /// against the requesting seat's own pieces. Preconditions are checked in
    /// a fixed order, each with a distinct error; on success the position is
    /// committed, any opposing occupant is captured, and either the turn
    /// advances or the win check fires.
    #[instrument(skip(self), fields(turn = %self.state.current_turn()))]
    pub fn apply_move(
        &mut self,
        seat: Seat,
        piece_id: &str,
        direction: &str,
    ) -> Result<MoveOutcome, MoveError> {
        if self.state.phase() != Phase::InProgress {
            return Err(MoveError::NotInProgress);
        }

        if seat != self.state.current_turn() {
            debug!(%seat, "Move out of turn");
            return Err(MoveError::NotYourTurn);
        }

        // Resolve the name within the requester's own catalog.
        let name = PieceName::from_str(piece_id)
            .map_err(|_| MoveError::UnknownOrInactivePiece(piece_id.to_string()))?;
        let id = PieceId::new(seat, name);
        let piece = self
            .state
            .pieces()
            .get(&id)
            .copied()
            .ok_or_else(|| MoveError::UnknownOrInactivePiece(piece_id.to_string()))?;

        let delta = Direction::from_str(direction)
            .ok()
            .and_then(|dir| move_delta(piece.kind, dir))
            .ok_or_else(|| MoveError::IllegalDirection(direction.to_string()))?;

        let to = piece.cell.offset(delta).ok_or(MoveError::OutOfBounds)?;

        let captured = match self.state.occupant(to) {
            None => None,
            // Same-kind occupants block the destination regardless of owner.
            Some((_, occupant)) if occupant.kind == piece.kind => {
                return Err(MoveError::IllegalDestination);
            }
            // Landing on one's own piece would stack two pieces on a cell.
            Some((_, occupant)) if occupant.seat == seat => {
                return Err(MoveError::IllegalDestination);
            }
            Some((victim, _)) => Some(victim),
        };

        // All preconditions passed; commit.
        self.state.commit_move(id, to, captured);

        info!(piece = %id, %to, captured = ?captured, "Move applied");

        if self.state.remaining(seat.opponent()) == 0 {
            self.state.set_phase(Phase::Finished);
            info!(winner = %seat, "Last opposing piece captured, game over");
            Ok(MoveOutcome::Won { winner: seat })
        } else {
            self.state.advance_turn();
            Ok(MoveOutcome::Moved {
                piece: id,
                to,
                captured,
            })
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
