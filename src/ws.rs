//! Per-room WebSocket viewer channel.
//!
//! Viewers subscribe with a room code and get a payload-free
//! `room_changed` hint whenever the room or one of its players mutates;
//! they re-fetch the snapshot over HTTP. The socket is push-only.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::{IntoResponse, Response},
};
use futures::{sink::SinkExt, stream::SplitSink, stream::StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use crate::app::AppState;
use crate::protocol::ServerMessage;
use crate::types::RoomId;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub code: String,
}

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    // Resolve the room before upgrading so unknown codes fail as plain 404s.
    match state.engine.get_room_data(&params.code).await {
        Ok((room, _)) => {
            tracing::info!(code = %room.code, "viewer connecting");
            ws.on_upgrade(move |socket| handle_socket(socket, room.id, state))
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Handle individual viewer connection
async fn handle_socket(socket: WebSocket, room_id: RoomId, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut events = state.events.subscribe();

    // Initial hint so the viewer renders current state immediately.
    if send_changed(&mut sender).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Ok(ev) if ev.room_id == room_id => {
                        if send_changed(&mut sender).await.is_err() {
                            break;
                        }
                    }
                    // Another room's event.
                    Ok(_) => {}
                    // Dropped events still mean "something changed".
                    Err(RecvError::Lagged(_)) => {
                        if send_changed(&mut sender).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            ws_msg = receiver.next() => {
                match ws_msg {
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        break;
                    }
                    // Viewers don't send commands; ignore everything else.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error: {}", e);
                        break;
                    }
                }
            }
        }
    }

    tracing::info!(%room_id, "viewer disconnected");
}

async fn send_changed(sender: &mut SplitSink<WebSocket, Message>) -> Result<(), ()> {
    let json = serde_json::to_string(&ServerMessage::RoomChanged).map_err(|_| ())?;
    sender
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}
