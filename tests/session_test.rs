//! Tests for room seating and event dispatch.
//!
//! These drive the room through in-memory channels, standing in for the
//! WebSocket transport.

use skirmish_games::{
    Cell, Game, GameState, PieceId, PieceName, Phase, Room, Seating, Seat, ServerMessage,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, error::TryRecvError};

fn join(room: &Room) -> (Seating, UnboundedReceiver<ServerMessage>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let seating = room.join(tx).expect("seat available");
    (seating, rx)
}

fn drain(rx: &mut UnboundedReceiver<ServerMessage>) -> Vec<ServerMessage> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn move_text(piece: &str, direction: &str) -> String {
    format!(r#"{{"piece":"{piece}","move":"{direction}"}}"#)
}

#[test]
fn test_first_two_connections_are_seated_in_order() {
    let room = Room::new();

    let (first, mut rx1) = join(&room);
    assert_eq!(first.seat, Seat::One);
    assert_eq!(drain(&mut rx1), vec![ServerMessage::Init { player: 1 }]);
    assert_eq!(room.snapshot().phase(), Phase::WaitingForPlayers);

    let (second, mut rx2) = join(&room);
    assert_eq!(second.seat, Seat::Two);

    // Seating the second player starts the game and broadcasts the opening.
    let events2 = drain(&mut rx2);
    assert_eq!(events2[0], ServerMessage::Init { player: 2 });
    assert!(matches!(events2[1], ServerMessage::Update { .. }));
    assert!(matches!(drain(&mut rx1)[0], ServerMessage::Update { .. }));
    assert_eq!(room.snapshot().phase(), Phase::InProgress);
}

#[test]
fn test_third_connection_is_rejected_without_disturbing_seats() {
    let room = Room::new();
    let (_s1, mut rx1) = join(&room);
    let (_s2, mut rx2) = join(&room);
    drain(&mut rx1);
    drain(&mut rx2);

    let (tx, mut rx3) = mpsc::unbounded_channel();
    let rejected = room.join(tx);
    assert!(rejected.is_err());
    assert_eq!(
        drain(&mut rx3),
        vec![ServerMessage::Error {
            message: "Game already full".to_string(),
        }]
    );

    // Existing seats see nothing and the game goes on.
    assert!(drain(&mut rx1).is_empty());
    assert!(drain(&mut rx2).is_empty());
    assert_eq!(room.snapshot().phase(), Phase::InProgress);
}

#[test]
fn test_legal_move_is_broadcast_to_both_seats() {
    let room = Room::new();
    let (s1, mut rx1) = join(&room);
    let (_s2, mut rx2) = join(&room);
    drain(&mut rx1);
    drain(&mut rx2);

    room.handle_message(s1.conn, &move_text("P1", "F"));

    for rx in [&mut rx1, &mut rx2] {
        let events = drain(rx);
        let ServerMessage::Update {
            piece_positions,
            current_player,
        } = &events[0]
        else {
            panic!("expected update broadcast");
        };
        assert_eq!(*current_player, 2);
        assert_eq!(piece_positions["1:P1"], Cell::new(2, 1));
    }
}

#[test]
fn test_rejected_move_is_unicast_to_the_requester() {
    let room = Room::new();
    let (_s1, mut rx1) = join(&room);
    let (s2, mut rx2) = join(&room);
    drain(&mut rx1);
    drain(&mut rx2);
    let before = room.snapshot();

    // Seat 2 moves while it is seat 1's turn.
    room.handle_message(s2.conn, &move_text("P1", "B"));

    assert_eq!(
        drain(&mut rx2),
        vec![ServerMessage::Error {
            message: "Not your turn".to_string(),
        }]
    );
    assert!(drain(&mut rx1).is_empty(), "opponent must not see the error");
    assert_eq!(room.snapshot(), before, "rejection must not touch state");
}

#[test]
fn test_malformed_request_never_reaches_validation() {
    let room = Room::new();
    let (s1, mut rx1) = join(&room);
    let (_s2, mut rx2) = join(&room);
    drain(&mut rx1);
    drain(&mut rx2);
    let before = room.snapshot();

    room.handle_message(s1.conn, "not json at all");
    room.handle_message(s1.conn, r#"{"piece":"P1"}"#);

    let events = drain(&mut rx1);
    assert_eq!(events.len(), 2);
    for event in events {
        let ServerMessage::Error { message } = event else {
            panic!("expected error event");
        };
        assert!(message.starts_with("Malformed request"));
    }
    assert!(drain(&mut rx2).is_empty());
    assert_eq!(room.snapshot(), before);
}

#[test]
fn test_winning_move_broadcasts_game_over_and_resets_the_room() {
    // Seat 1 is down to a lone pawn; seat 2's H1 can take it.
    let game = Game::from_state(GameState::with_pieces(
        vec![
            (PieceId::new(Seat::One, PieceName::P1), Cell::new(2, 2)),
            (PieceId::new(Seat::Two, PieceName::H1), Cell::new(0, 2)),
        ],
        Seat::Two,
    ));
    let room = Room::from_game(game);
    let (s1, mut rx1) = join(&room);
    let (s2, mut rx2) = join(&room);
    drain(&mut rx1);
    drain(&mut rx2);

    room.handle_message(s2.conn, &move_text("H1", "R"));

    for rx in [&mut rx1, &mut rx2] {
        assert_eq!(drain(rx), vec![ServerMessage::GameOver { winner: 2 }]);
    }

    // The room is fresh: waiting phase, full opening deployment, seats free.
    let state = room.snapshot();
    assert_eq!(state.phase(), Phase::WaitingForPlayers);
    assert_eq!(state.pieces().len(), 12);

    // The old participants were vacated, not reseated; their channels are
    // gone and their moves go nowhere.
    room.handle_message(s1.conn, &move_text("P1", "F"));
    assert!(matches!(rx1.try_recv(), Err(TryRecvError::Disconnected)));

    // New connections take the freed seats.
    let (reseated, _rx) = join(&room);
    assert_eq!(reseated.seat, Seat::One);
}

#[test]
fn test_disconnect_keeps_the_seat_reserved() {
    let room = Room::new();
    let (s1, _rx1) = join(&room);
    let (_s2, _rx2) = join(&room);

    room.leave(s1.conn);

    // The seat stays frozen: a newcomer is still turned away.
    let (tx, mut rx3) = mpsc::unbounded_channel();
    assert!(room.join(tx).is_err());
    assert_eq!(
        drain(&mut rx3),
        vec![ServerMessage::Error {
            message: "Game already full".to_string(),
        }]
    );
    assert_eq!(room.snapshot().phase(), Phase::InProgress);
}
