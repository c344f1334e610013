//! Room management: the two participant seats and event dispatch.
//!
//! One [`Room`] holds one authoritative [`Game`] behind a mutex. Every join
//! and every move locks the room, so requests are processed strictly one at a
//! time in arrival order; no interleaving of two moves is possible and no
//! partially applied state is ever observable.

use crate::games::skirmish::{Game, GameState, MoveError, MoveOutcome, Phase, Seat};
use crate::protocol::{MoveRequest, ServerMessage};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

/// Opaque handle identifying one connection for the life of the process.
pub type ConnectionId = u64;

/// A seated participant.
#[derive(Debug, Clone)]
pub struct Participant {
    /// Connection handle.
    pub conn: ConnectionId,
    /// Assigned seat.
    pub seat: Seat,
    /// Outbound channel to this participant's socket.
    sender: UnboundedSender<ServerMessage>,
}

impl Participant {
    /// Queues a message for this participant, ignoring closed channels.
    fn send(&self, message: ServerMessage) {
        if self.sender.send(message).is_err() {
            debug!(conn = self.conn, "Dropping message for closed connection");
        }
    }
}

/// Result of a successful join.
#[derive(Debug, Clone, Copy)]
pub struct Seating {
    /// Connection handle to present on subsequent requests.
    pub conn: ConnectionId,
    /// Assigned seat.
    pub seat: Seat,
}

/// Rejection of a connection attempt while both seats are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("Game already full")]
pub struct GameFull;

impl std::error::Error for GameFull {}

#[derive(Debug)]
struct RoomState {
    game: Game,
    seats: [Option<Participant>; 2],
}

impl RoomState {
    fn new() -> Self {
        Self {
            game: Game::new(),
            seats: [None, None],
        }
    }

    fn participant(&self, conn: ConnectionId) -> Option<&Participant> {
        self.seats
            .iter()
            .flatten()
            .find(|participant| participant.conn == conn)
    }

    fn unicast(&self, conn: ConnectionId, message: ServerMessage) {
        if let Some(participant) = self.participant(conn) {
            participant.send(message);
        }
    }

    fn broadcast(&self, message: ServerMessage) {
        for participant in self.seats.iter().flatten() {
            participant.send(message.clone());
        }
    }
}

/// The single game room of this process.
///
/// Cheap to clone; clones share the same room. One game per process is a
/// constructor-time decision, not an ambient global: a caller that ever needs
/// several concurrent games can construct several rooms.
#[derive(Debug, Clone)]
pub struct Room {
    inner: Arc<Mutex<RoomState>>,
    next_conn: Arc<AtomicU64>,
}

impl Room {
    /// Creates an empty room waiting for players.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game room");
        Self {
            inner: Arc::new(Mutex::new(RoomState::new())),
            next_conn: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Creates a room over an explicit game, still waiting for players.
    pub fn from_game(game: Game) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RoomState {
                game,
                seats: [None, None],
            })),
            next_conn: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Seats a new connection, delivering its `init` event.
    ///
    /// The first two successful connections take seats 1 and 2; once both are
    /// filled the game starts and the opening position is broadcast. A third
    /// attempt receives the `Game already full` error on its own channel and
    /// is rejected; the caller must close the connection.
    #[instrument(skip(self, sender))]
    pub fn join(&self, sender: UnboundedSender<ServerMessage>) -> Result<Seating, GameFull> {
        let mut room = self.inner.lock().unwrap();

        let Some(slot) = room.seats.iter().position(Option::is_none) else {
            warn!("Rejecting connection, both seats filled");
            let _ = sender.send(ServerMessage::error(GameFull));
            return Err(GameFull);
        };

        let seat = if slot == 0 { Seat::One } else { Seat::Two };
        let conn = self.next_conn.fetch_add(1, Ordering::Relaxed);
        let participant = Participant { conn, seat, sender };
        participant.send(ServerMessage::Init {
            player: seat.number(),
        });
        room.seats[slot] = Some(participant);
        info!(conn, %seat, "Participant seated");

        if room.seats.iter().all(Option::is_some) {
            room.game.start();
            let update = ServerMessage::update(room.game.state());
            room.broadcast(update);
        }

        Ok(Seating { conn, seat })
    }

    /// Handles one inbound text frame from a connection.
    ///
    /// Malformed frames and rejected moves produce an error event unicast to
    /// the requester only. Legal moves broadcast an update; a winning move
    /// broadcasts `gameOver` and resets the room to a fresh waiting state
    /// with both seats vacated.
    #[instrument(skip(self, text))]
    pub fn handle_message(&self, conn: ConnectionId, text: &str) {
        let mut room = self.inner.lock().unwrap();

        let request: MoveRequest = match serde_json::from_str(text) {
            Ok(request) => request,
            Err(err) => {
                warn!(conn, error = %err, "Malformed request");
                room.unicast(conn, ServerMessage::error(format!("Malformed request: {err}")));
                return;
            }
        };

        // A connection orphaned by a reset is no longer seated; it gets the
        // same rejection the engine would give, with state untouched.
        let Some(seat) = room.participant(conn).map(|p| p.seat) else {
            debug!(conn, "Move from unseated connection");
            let error = if room.game.state().phase() == Phase::InProgress {
                MoveError::NotYourTurn
            } else {
                MoveError::NotInProgress
            };
            room.unicast(conn, ServerMessage::error(error));
            return;
        };

        match room.game.apply_move(seat, &request.piece, &request.direction) {
            Ok(MoveOutcome::Moved { .. }) => {
                let update = ServerMessage::update(room.game.state());
                room.broadcast(update);
            }
            Ok(MoveOutcome::Won { winner }) => {
                room.broadcast(ServerMessage::GameOver {
                    winner: winner.number(),
                });
                // Full reset: fresh game, seats vacated. Existing connections
                // are not reseated and must rejoin.
                info!(%winner, "Resetting room after win");
                room.game = Game::new();
                room.seats = [None, None];
            }
            Err(err) => {
                debug!(conn, %seat, error = %err, "Move rejected");
                room.unicast(conn, ServerMessage::error(err));
            }
        }
    }

    /// Records a disconnect.
    ///
    /// The seat stays reserved and the game state is untouched; a vanished
    /// opponent stalls the game for the rest of the process's life.
    #[instrument(skip(self))]
    pub fn leave(&self, conn: ConnectionId) {
        let room = self.inner.lock().unwrap();
        match room.participant(conn) {
            Some(participant) => {
                warn!(conn, seat = %participant.seat, "Participant disconnected, seat stays reserved");
            }
            None => debug!(conn, "Unseated connection closed"),
        }
    }

    /// Returns a snapshot of the authoritative game state.
    pub fn snapshot(&self) -> GameState {
        self.inner.lock().unwrap().game.state().clone()
    }
}

impl Default for Room {
    fn default() -> Self {
        Self::new()
    }
}
