use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque ID types for type safety
pub type RoomId = String;
pub type PlayerId = String;

/// Minimum number of players a room needs before a reveal is allowed.
pub const MIN_PLAYERS: usize = 3;

/// Inclusive bounds for a submitted number.
pub const NUMBER_MIN: u8 = 1;
pub const NUMBER_MAX: u8 = 100;

/// Maximum player name length after trimming.
pub const NAME_MAX_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    Revealed,
}

/// A single game session, shared via its short code.
///
/// `code` and `host_token` are immutable once assigned; `status` is the only
/// mutable field and flips waiting -> revealed -> (restart) -> waiting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub code: String,
    pub host_token: String,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn new(code: String, host_token: String) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            code,
            host_token,
            status: RoomStatus::Waiting,
            created_at: Utc::now(),
        }
    }
}

/// A player row. `number` is write-once per round: null until submitted,
/// then frozen until the room restarts and the row is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub room_id: RoomId,
    pub name: String,
    pub number: Option<u8>,
    pub created_at: DateTime<Utc>,
}

impl Player {
    pub fn new(room_id: RoomId, name: String) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            room_id,
            name,
            number: None,
            created_at: Utc::now(),
        }
    }

    pub fn has_submitted(&self) -> bool {
        self.number.is_some()
    }
}
