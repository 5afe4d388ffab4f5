//! Change notification seam.
//!
//! The engine emits one event per accepted mutation; transports subscribe
//! and fan out. Events carry no row data; delivery is at-least-once and
//! consumers re-fetch authoritative state instead of trusting payloads.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::RoomId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// The room row changed (reveal, restart).
    Room,
    /// A player row under the room changed (join, submit).
    Player,
}

/// A state change under a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomEvent {
    pub room_id: RoomId,
    pub kind: ChangeKind,
}

/// Narrow notification interface the engine talks to. Implementations own
/// the transport.
pub trait ChangeNotifier: Send + Sync {
    fn room_changed(&self, room_id: &RoomId);
    fn player_changed(&self, room_id: &RoomId);
}

/// Broadcast-channel notifier. WebSocket handlers subscribe and filter by
/// room id.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<RoomEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RoomEvent> {
        self.tx.subscribe()
    }

    fn publish(&self, room_id: &RoomId, kind: ChangeKind) {
        // Ignore send errors (no receivers connected is fine)
        let _ = self.tx.send(RoomEvent {
            room_id: room_id.clone(),
            kind,
        });
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl ChangeNotifier for EventBus {
    fn room_changed(&self, room_id: &RoomId) {
        self.publish(room_id, ChangeKind::Room);
    }

    fn player_changed(&self, room_id: &RoomId) {
        self.publish(room_id, ChangeKind::Player);
    }
}
