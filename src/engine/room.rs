use serde::Serialize;

use super::RoomEngine;
use crate::codes;
use crate::error::GameError;
use crate::store::StoreError;
use crate::types::{Player, PlayerId, Room, RoomStatus, NAME_MAX_CHARS};

/// How many distinct codes to try before giving up on room creation.
const CODE_ATTEMPTS: usize = 10;

/// Credentials handed to a room's creator. The token is never re-derivable;
/// losing it forfeits host privileges for that room.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedRoom {
    pub code: String,
    pub host_token: String,
}

/// Room codes arrive trimmed-or-not and in any case from clients.
pub(super) fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

impl RoomEngine {
    /// Create a room with a fresh code and host token.
    ///
    /// Collisions are detected by the store's unique constraint on `code`,
    /// not by a pre-read, so two creates racing on the same candidate code
    /// resolve to one winner and one retry.
    pub async fn create_room(&self) -> Result<CreatedRoom, GameError> {
        for _ in 0..CODE_ATTEMPTS {
            let code = codes::generate_room_code();
            let host_token = codes::generate_host_token();
            match self
                .store
                .insert_room(Room::new(code.clone(), host_token.clone()))
                .await
            {
                Ok(()) => {
                    tracing::info!(%code, "room created");
                    return Ok(CreatedRoom { code, host_token });
                }
                Err(StoreError::UniqueViolation) => continue,
                Err(e) => {
                    tracing::error!(error = %e, "room insert failed");
                    return Err(e.into());
                }
            }
        }
        tracing::error!("room code space exhausted after {CODE_ATTEMPTS} attempts");
        Err(GameError::CodeExhausted)
    }

    /// Join a waiting room under a unique name.
    pub async fn join_room(&self, code: &str, name: &str) -> Result<PlayerId, GameError> {
        let code = normalize_code(code);
        if code.len() != codes::CODE_LENGTH {
            return Err(GameError::InvalidCode);
        }
        let name = name.trim();
        if name.is_empty() || name.chars().count() > NAME_MAX_CHARS {
            return Err(GameError::InvalidName);
        }

        let room = self
            .store
            .room_by_code(&code)
            .await?
            .ok_or(GameError::RoomNotFound)?;
        if room.status == RoomStatus::Revealed {
            return Err(GameError::GameAlreadyEnded);
        }

        let player = Player::new(room.id.clone(), name.to_string());
        let player_id = player.id.clone();
        match self.store.insert_player(player).await {
            Ok(()) => {}
            // Two joins racing on the same name: the store picks the winner.
            Err(StoreError::UniqueViolation) => return Err(GameError::NameTaken),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(%code, %name, %player_id, "player joined");
        self.notifier.player_changed(&room.id);
        Ok(player_id)
    }

    /// Fetch a room and its players, ordered by join time.
    pub async fn get_room_data(&self, code: &str) -> Result<(Room, Vec<Player>), GameError> {
        let code = normalize_code(code);
        let room = self
            .store
            .room_by_code(&code)
            .await?
            .ok_or(GameError::RoomNotFound)?;
        let players = self.store.players_by_room(&room.id).await?;
        Ok((room, players))
    }
}
