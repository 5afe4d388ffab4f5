//! In-memory store, used by tests and single-process deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RoomStore, StoreError};
use crate::types::{Player, PlayerId, Room, RoomId, RoomStatus};

#[derive(Default)]
struct Tables {
    rooms: HashMap<RoomId, Room>,
    players: HashMap<PlayerId, Player>,
}

/// HashMap-backed [`RoomStore`].
///
/// Both tables sit behind one lock; holding the write guard across a
/// check-and-write is what makes the unique constraints and conditional
/// updates atomic.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStore for MemoryStore {
    async fn insert_room(&self, room: Room) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.rooms.values().any(|r| r.code == room.code) {
            return Err(StoreError::UniqueViolation);
        }
        tables.rooms.insert(room.id.clone(), room);
        Ok(())
    }

    async fn room_by_code(&self, code: &str) -> Result<Option<Room>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.rooms.values().find(|r| r.code == code).cloned())
    }

    async fn insert_player(&self, player: Player) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables
            .players
            .values()
            .any(|p| p.room_id == player.room_id && p.name == player.name)
        {
            return Err(StoreError::UniqueViolation);
        }
        tables.players.insert(player.id.clone(), player);
        Ok(())
    }

    async fn player_by_id(&self, player_id: &PlayerId) -> Result<Option<Player>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.players.get(player_id).cloned())
    }

    async fn players_by_room(&self, room_id: &RoomId) -> Result<Vec<Player>, StoreError> {
        let tables = self.tables.read().await;
        let mut players: Vec<Player> = tables
            .players
            .values()
            .filter(|p| p.room_id == *room_id)
            .cloned()
            .collect();
        // Ulids are monotonic enough to break same-millisecond join ties.
        players.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(players)
    }

    async fn set_number_if_unset(
        &self,
        player_id: &PlayerId,
        number: u8,
    ) -> Result<Player, StoreError> {
        let mut tables = self.tables.write().await;
        let player = tables
            .players
            .get_mut(player_id)
            .ok_or(StoreError::NotFound)?;
        if player.number.is_some() {
            return Err(StoreError::PreconditionFailed);
        }
        player.number = Some(number);
        Ok(player.clone())
    }

    async fn set_status_if(
        &self,
        room_id: &RoomId,
        from: RoomStatus,
        to: RoomStatus,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let room = tables.rooms.get_mut(room_id).ok_or(StoreError::NotFound)?;
        if room.status != from {
            return Err(StoreError::PreconditionFailed);
        }
        room.status = to;
        Ok(())
    }

    async fn reset_room(&self, room_id: &RoomId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let room = tables.rooms.get_mut(room_id).ok_or(StoreError::NotFound)?;
        room.status = RoomStatus::Waiting;
        tables.players.retain(|_, p| p.room_id != *room_id);
        Ok(())
    }
}
