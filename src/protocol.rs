//! Wire types for the HTTP API and the room WebSocket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::consensus;
use crate::types::{Player, PlayerId, Room, RoomStatus};

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitNumberRequest {
    pub number: i64,
}

/// Body of host-privileged operations (reveal, restart).
#[derive(Debug, Deserialize)]
pub struct HostRequest {
    pub host_token: String,
}

#[derive(Debug, Serialize)]
pub struct JoinedResponse {
    pub player_id: PlayerId,
}

/// Error body shared by all endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub msg: String,
}

/// Client-facing room row. The host token never leaves the server.
#[derive(Debug, Serialize)]
pub struct RoomView {
    pub code: String,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
}

/// Client-facing player row.
///
/// Numbers stay secret while the round is open; viewers only learn who has
/// submitted. Once revealed, the numbers ship with the snapshot.
#[derive(Debug, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub submitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct ResultView {
    pub average: f64,
    pub two_thirds: f64,
    pub winner_ids: Vec<PlayerId>,
}

/// Authoritative per-room state served by `GET /api/rooms/{code}` and
/// re-fetched by viewers on every change event.
#[derive(Debug, Serialize)]
pub struct RoomSnapshot {
    pub room: RoomView,
    pub players: Vec<PlayerView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultView>,
}

impl RoomSnapshot {
    pub fn new(room: &Room, players: &[Player]) -> Self {
        let revealed = room.status == RoomStatus::Revealed;

        let result = if revealed {
            consensus::compute_result(players).map(|r| ResultView {
                average: r.average,
                two_thirds: r.two_thirds,
                winner_ids: r.winners.into_iter().map(|p| p.id).collect(),
            })
        } else {
            None
        };

        Self {
            room: RoomView {
                code: room.code.clone(),
                status: room.status,
                created_at: room.created_at,
            },
            players: players
                .iter()
                .map(|p| PlayerView {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    submitted: p.has_submitted(),
                    number: if revealed { p.number } else { None },
                })
                .collect(),
            result,
        }
    }
}

/// Messages pushed to room viewers over the WebSocket. Payload-free by
/// design: delivery is at-least-once and clients re-fetch the snapshot
/// rather than trusting event data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Something under the room changed; re-fetch the snapshot.
    RoomChanged,
}
