//! Error types for the room lifecycle engine.

use crate::store::StoreError;
use crate::types::MIN_PLAYERS;

/// Errors surfaced by lifecycle operations.
///
/// Validation and state-conflict variants carry caller-actionable messages;
/// `Unauthorized` is deliberately detail-free, and store failures are logged
/// at the call site and surfaced without internal detail.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Game already ended")]
    GameAlreadyEnded,

    #[error("Name already taken in this room")]
    NameTaken,

    #[error("Invalid room code")]
    InvalidCode,

    #[error("Name must be 1-30 characters")]
    InvalidName,

    #[error("Player not found")]
    PlayerNotFound,

    #[error("Already submitted")]
    AlreadySubmitted,

    #[error("Number must be between 1 and 100")]
    InvalidNumber,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Already revealed")]
    AlreadyRevealed,

    #[error("Need at least {MIN_PLAYERS} players")]
    NotEnoughPlayers,

    #[error("Not all players have submitted")]
    IncompleteSubmissions,

    /// Every candidate room code collided with an existing room.
    #[error("Could not allocate a room code")]
    CodeExhausted,

    #[error("Storage error")]
    Store(#[from] StoreError),
}

impl GameError {
    /// Stable machine-readable code for client dispatch.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::RoomNotFound => "ROOM_NOT_FOUND",
            GameError::GameAlreadyEnded => "GAME_ALREADY_ENDED",
            GameError::NameTaken => "NAME_TAKEN",
            GameError::InvalidCode => "INVALID_CODE",
            GameError::InvalidName => "INVALID_NAME",
            GameError::PlayerNotFound => "PLAYER_NOT_FOUND",
            GameError::AlreadySubmitted => "ALREADY_SUBMITTED",
            GameError::InvalidNumber => "INVALID_NUMBER",
            GameError::Unauthorized => "UNAUTHORIZED",
            GameError::AlreadyRevealed => "ALREADY_REVEALED",
            GameError::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            GameError::IncompleteSubmissions => "INCOMPLETE_SUBMISSIONS",
            GameError::CodeExhausted => "CODE_EXHAUSTED",
            GameError::Store(_) => "STORAGE_ERROR",
        }
    }
}
