//! Tests for the JSON wire protocol.

use skirmish_games::{Cell, GameState, MoveRequest, ServerMessage};
use serde_json::json;

#[test]
fn test_move_request_wire_shape() {
    let request: MoveRequest = serde_json::from_value(json!({
        "piece": "P1",
        "move": "F",
    }))
    .expect("inbound shape parses");
    assert_eq!(request.piece, "P1");
    assert_eq!(request.direction, "F");
}

#[test]
fn test_move_request_missing_field_is_rejected() {
    let result = serde_json::from_value::<MoveRequest>(json!({ "piece": "P1" }));
    assert!(result.is_err());
}

#[test]
fn test_outbound_tags_and_field_names() {
    let init = serde_json::to_value(ServerMessage::Init { player: 1 }).unwrap();
    assert_eq!(init, json!({ "type": "init", "player": 1 }));

    let game_over = serde_json::to_value(ServerMessage::GameOver { winner: 2 }).unwrap();
    assert_eq!(game_over, json!({ "type": "gameOver", "winner": 2 }));

    let error = serde_json::to_value(ServerMessage::error("Not your turn")).unwrap();
    assert_eq!(error, json!({ "type": "error", "message": "Not your turn" }));

    let update = serde_json::to_value(ServerMessage::update(&GameState::new())).unwrap();
    assert_eq!(update["type"], "update");
    assert_eq!(update["currentPlayer"], 1);
    assert_eq!(update["piecePositions"]["1:P1"], json!({ "row": 3, "col": 1 }));
    assert_eq!(update["piecePositions"]["2:H3"], json!({ "row": 0, "col": 3 }));
}

#[test]
fn test_update_round_trips_the_occupancy_set() {
    let state = GameState::new();
    let event = ServerMessage::update(&state);

    let text = serde_json::to_string(&event).expect("encodes");
    let decoded: ServerMessage = serde_json::from_str(&text).expect("decodes");

    let ServerMessage::Update {
        piece_positions,
        current_player,
    } = decoded
    else {
        panic!("expected update event");
    };

    assert_eq!(current_player, state.current_turn().number());
    assert_eq!(piece_positions.len(), state.pieces().len());
    for (piece_id, piece) in state.pieces() {
        assert_eq!(piece_positions[&piece_id.to_string()], piece.cell);
    }
}

#[test]
fn test_cell_serializes_as_row_col() {
    let cell = serde_json::to_value(Cell::new(2, 4)).unwrap();
    assert_eq!(cell, json!({ "row": 2, "col": 4 }));
}
