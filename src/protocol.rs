//! Wire message types for the WebSocket protocol.
//!
//! Field and tag names are camelCase on the wire. Inbound
//! traffic is always a move request; outbound traffic is a tagged union the
//! transport unicasts or broadcasts.

use crate::games::skirmish::{Cell, GameState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inbound move request: `{"piece": "P1", "move": "F"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Unqualified piece name from the requester's catalog.
    pub piece: String,
    /// Direction token.
    #[serde(rename = "move")]
    pub direction: String,
}

/// Outbound server event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Sent once to a newly seated participant.
    Init {
        /// The seat assigned to the recipient (1 or 2).
        player: u8,
    },
    /// Broadcast to both participants after every legal move.
    #[serde(rename_all = "camelCase")]
    Update {
        /// Full position mapping, keyed by seat-qualified piece id
        /// (`"1:P1"`).
        piece_positions: BTreeMap<String, Cell>,
        /// Seat to move next (1 or 2).
        current_player: u8,
    },
    /// Broadcast to both participants when a win condition fires.
    GameOver {
        /// Winning seat (1 or 2).
        winner: u8,
    },
    /// Unicast to the requester whose request was rejected.
    Error {
        /// Human-readable rejection reason.
        message: String,
    },
}

impl ServerMessage {
    /// Builds the update event from the authoritative state.
    pub fn update(state: &GameState) -> Self {
        let piece_positions = state
            .pieces()
            .iter()
            .map(|(id, piece)| (id.to_string(), piece.cell))
            .collect();
        ServerMessage::Update {
            piece_positions,
            current_player: state.current_turn().number(),
        }
    }

    /// Builds an error event from any displayable rejection.
    pub fn error(message: impl std::fmt::Display) -> Self {
        ServerMessage::Error {
            message: message.to_string(),
        }
    }
}
