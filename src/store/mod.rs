//! Storage seam for rooms and players.
//!
//! The engine never does check-then-write against this trait: name
//! uniqueness and write-once numbers are enforced by the store itself, so
//! concurrent operations racing on the same row resolve to exactly one
//! winner.

pub mod memory;

pub use memory::MemoryStore;

use crate::types::{Player, PlayerId, Room, RoomId, RoomStatus};
use async_trait::async_trait;

/// Errors from the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint (room `code`, or `(room_id, name)`) rejected the
    /// write.
    #[error("unique constraint violation")]
    UniqueViolation,

    /// The addressed row does not exist.
    #[error("row not found")]
    NotFound,

    /// A conditional update found the row in a different state than
    /// required.
    #[error("precondition failed")]
    PreconditionFailed,

    /// The backing store could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable table of rooms and players.
///
/// Every method is atomic at the row level with read-after-write consistency
/// within a room: the uniqueness checks in the inserts and the predicates in
/// the conditional updates happen atomically with the write itself.
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Insert a room. Fails with [`StoreError::UniqueViolation`] if another
    /// room already holds the code.
    async fn insert_room(&self, room: Room) -> Result<(), StoreError>;

    async fn room_by_code(&self, code: &str) -> Result<Option<Room>, StoreError>;

    /// Insert a player. Fails with [`StoreError::UniqueViolation`] if the
    /// name is already present in the room (case-sensitive).
    async fn insert_player(&self, player: Player) -> Result<(), StoreError>;

    async fn player_by_id(&self, player_id: &PlayerId) -> Result<Option<Player>, StoreError>;

    /// All players of a room, ordered by join time.
    async fn players_by_room(&self, room_id: &RoomId) -> Result<Vec<Player>, StoreError>;

    /// Set a player's number only if none is set yet, returning the updated
    /// row. Fails with [`StoreError::PreconditionFailed`] if a number is
    /// already present.
    async fn set_number_if_unset(
        &self,
        player_id: &PlayerId,
        number: u8,
    ) -> Result<Player, StoreError>;

    /// Flip a room's status only if it currently equals `from`.
    async fn set_status_if(
        &self,
        room_id: &RoomId,
        from: RoomStatus,
        to: RoomStatus,
    ) -> Result<(), StoreError>;

    /// Delete all of a room's players and reset its status to waiting, as
    /// one transaction. A concurrent reader never observes a waiting room
    /// with stale players.
    async fn reset_room(&self, room_id: &RoomId) -> Result<(), StoreError>;
}
