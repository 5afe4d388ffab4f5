//! HTTP API endpoints for the room lifecycle.
//!
//! Thin adapters over [`RoomEngine`](crate::engine::RoomEngine): extract,
//! call, map the typed error to a status code and `{code, msg}` body.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::app::AppState;
use crate::engine::CreatedRoom;
use crate::error::GameError;
use crate::protocol::{
    ErrorBody, HostRequest, JoinRequest, JoinedResponse, RoomSnapshot, SubmitNumberRequest,
};

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        // Store failures are logged here and surfaced without internal detail.
        if let GameError::Store(e) = &self {
            tracing::error!(error = %e, "storage failure");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    code: "STORAGE_ERROR".to_string(),
                    msg: "Internal error".to_string(),
                }),
            )
                .into_response();
        }

        let status = match self {
            GameError::InvalidCode | GameError::InvalidName | GameError::InvalidNumber => {
                StatusCode::BAD_REQUEST
            }
            GameError::Unauthorized => StatusCode::UNAUTHORIZED,
            GameError::RoomNotFound | GameError::PlayerNotFound => StatusCode::NOT_FOUND,
            GameError::GameAlreadyEnded
            | GameError::NameTaken
            | GameError::AlreadySubmitted
            | GameError::AlreadyRevealed
            | GameError::NotEnoughPlayers
            | GameError::IncompleteSubmissions => StatusCode::CONFLICT,
            GameError::CodeExhausted => StatusCode::SERVICE_UNAVAILABLE,
            GameError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorBody {
                code: self.code().to_string(),
                msg: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// POST /api/rooms
pub async fn create_room(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CreatedRoom>, GameError> {
    let created = state.engine.create_room().await?;
    Ok(Json(created))
}

/// POST /api/rooms/{code}/players
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Json(req): Json<JoinRequest>,
) -> Result<Json<JoinedResponse>, GameError> {
    let player_id = state.engine.join_room(&code, &req.name).await?;
    Ok(Json(JoinedResponse { player_id }))
}

/// POST /api/players/{player_id}/number
pub async fn submit_number(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
    Json(req): Json<SubmitNumberRequest>,
) -> Result<StatusCode, GameError> {
    state.engine.submit_number(&player_id, req.number).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/rooms/{code}/reveal
pub async fn reveal_results(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Json(req): Json<HostRequest>,
) -> Result<StatusCode, GameError> {
    state.engine.reveal_results(&code, &req.host_token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/rooms/{code}/restart
pub async fn restart_game(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Json(req): Json<HostRequest>,
) -> Result<StatusCode, GameError> {
    state.engine.restart_game(&code, &req.host_token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/rooms/{code}
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<RoomSnapshot>, GameError> {
    let (room, players) = state.engine.get_room_data(&code).await?;
    Ok(Json(RoomSnapshot::new(&room, &players)))
}
