//! WebSocket transport for the game room.
//!
//! The transport is deliberately thin: each inbound text frame is one move
//! request handed to the room, and each outbound event is one text frame.
//! All game logic lives behind [`Room`].

use crate::protocol::ServerMessage;
use crate::session::Room;
use anyhow::Result;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Builds the router serving the game socket at `/ws`.
pub fn router(room: Room) -> Router {
    Router::new().route("/ws", get(ws_handler)).with_state(room)
}

/// Binds and serves the game socket until the process exits.
pub async fn serve(room: Room, host: &str, port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(host, port, "Game server listening");
    axum::serve(listener, router(room)).await?;
    Ok(())
}

async fn ws_handler(ws: WebSocketUpgrade, State(room): State<Room>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, room))
}

/// Drives one connection: seats it, forwards outbound events, and feeds
/// inbound frames to the room until either side closes.
async fn handle_socket(socket: WebSocket, room: Room) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let seating = room.join(tx);

    // Forward queued events to the socket; ends when the room drops the
    // sender (rejection or reset) or the peer goes away.
    let mut writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(err) => {
                    warn!(error = %err, "Failed to encode event");
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
        let _ = sink.close().await;
    });

    let seating = match seating {
        Ok(seating) => seating,
        Err(_) => {
            // The rejection error is already queued; let the writer flush it,
            // then the connection closes.
            debug!("Connection rejected, closing after error delivery");
            let _ = writer.await;
            return;
        }
    };

    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => room.handle_message(seating.conn, &text),
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => debug!(conn = seating.conn, "Ignoring non-text frame"),
                Some(Err(err)) => {
                    warn!(conn = seating.conn, error = %err, "Socket error");
                    break;
                }
            },
            _ = &mut writer => break,
        }
    }

    room.leave(seating.conn);
    writer.abort();
}
