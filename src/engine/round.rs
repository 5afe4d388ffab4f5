use super::room::normalize_code;
use super::RoomEngine;
use crate::codes::constant_time_eq;
use crate::error::GameError;
use crate::store::StoreError;
use crate::types::{Room, RoomStatus, MIN_PLAYERS, NUMBER_MAX, NUMBER_MIN};

impl RoomEngine {
    /// Record a player's secret number. Write-once: the store's conditional
    /// update rejects a second submission, so two concurrent submits for the
    /// same player serialize to one winner.
    pub async fn submit_number(&self, player_id: &str, number: i64) -> Result<(), GameError> {
        if number < i64::from(NUMBER_MIN) || number > i64::from(NUMBER_MAX) {
            return Err(GameError::InvalidNumber);
        }

        let player = match self
            .store
            .set_number_if_unset(&player_id.to_string(), number as u8)
            .await
        {
            Ok(player) => player,
            Err(StoreError::NotFound) => return Err(GameError::PlayerNotFound),
            Err(StoreError::PreconditionFailed) => return Err(GameError::AlreadySubmitted),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(%player_id, "number submitted");
        self.notifier.player_changed(&player.room_id);
        Ok(())
    }

    /// Flip the room to revealed, locking submissions for the round.
    ///
    /// The status flip is a conditional update against a fresh read, so it
    /// observes a store state causally after the last accepted submission;
    /// a lost race surfaces as `AlreadyRevealed`.
    pub async fn reveal_results(&self, code: &str, host_token: &str) -> Result<(), GameError> {
        let room = self.authorize_host(code, host_token).await?;
        if room.status == RoomStatus::Revealed {
            return Err(GameError::AlreadyRevealed);
        }

        let players = self.store.players_by_room(&room.id).await?;
        if players.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers);
        }
        if players.iter().any(|p| !p.has_submitted()) {
            return Err(GameError::IncompleteSubmissions);
        }

        match self
            .store
            .set_status_if(&room.id, RoomStatus::Waiting, RoomStatus::Revealed)
            .await
        {
            Ok(()) => {}
            Err(StoreError::PreconditionFailed) => return Err(GameError::AlreadyRevealed),
            Err(StoreError::NotFound) => return Err(GameError::RoomNotFound),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(code = %room.code, players = players.len(), "results revealed");
        self.notifier.room_changed(&room.id);
        Ok(())
    }

    /// Delete all players and return the room to waiting. The code and host
    /// token survive so the same room can host round after round.
    pub async fn restart_game(&self, code: &str, host_token: &str) -> Result<(), GameError> {
        let room = self.authorize_host(code, host_token).await?;

        match self.store.reset_room(&room.id).await {
            Ok(()) => {}
            Err(StoreError::NotFound) => return Err(GameError::RoomNotFound),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(code = %room.code, "game restarted");
        self.notifier.room_changed(&room.id);
        Ok(())
    }

    async fn authorize_host(&self, code: &str, host_token: &str) -> Result<Room, GameError> {
        let code = normalize_code(code);
        let room = self
            .store
            .room_by_code(&code)
            .await?
            .ok_or(GameError::RoomNotFound)?;
        if !constant_time_eq(room.host_token.as_bytes(), host_token.as_bytes()) {
            return Err(GameError::Unauthorized);
        }
        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{engine, engine_with_bus};
    use super::*;
    use crate::engine::RoomEngine;
    use crate::notify::ChangeKind;
    use crate::types::PlayerId;

    async fn room_with_players(engine: &RoomEngine, names: &[&str]) -> (String, String, Vec<PlayerId>) {
        let created = engine.create_room().await.unwrap();
        let mut ids = Vec::new();
        for name in names {
            ids.push(engine.join_room(&created.code, name).await.unwrap());
        }
        (created.code, created.host_token, ids)
    }

    #[tokio::test]
    async fn test_submit_validates_range() {
        let engine = engine();
        let (_, _, ids) = room_with_players(&engine, &["Alice"]).await;

        for bad in [0i64, 101, -5, 1000] {
            let result = engine.submit_number(&ids[0], bad).await;
            assert!(matches!(result, Err(GameError::InvalidNumber)));
        }

        engine.submit_number(&ids[0], 100).await.unwrap();
    }

    #[tokio::test]
    async fn test_submit_unknown_player() {
        let engine = engine();
        let result = engine.submit_number("missing", 50).await;
        assert!(matches!(result, Err(GameError::PlayerNotFound)));
    }

    #[tokio::test]
    async fn test_submit_is_write_once() {
        let engine = engine();
        let (code, _, ids) = room_with_players(&engine, &["Alice"]).await;

        engine.submit_number(&ids[0], 30).await.unwrap();
        let second = engine.submit_number(&ids[0], 60).await;
        assert!(matches!(second, Err(GameError::AlreadySubmitted)));

        let (_, players) = engine.get_room_data(&code).await.unwrap();
        assert_eq!(players[0].number, Some(30));
    }

    #[tokio::test]
    async fn test_concurrent_submits_single_winner() {
        let engine = engine();
        let (code, _, ids) = room_with_players(&engine, &["Alice"]).await;

        let (a, b) = tokio::join!(
            engine.submit_number(&ids[0], 10),
            engine.submit_number(&ids[0], 90)
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);

        let (_, players) = engine.get_room_data(&code).await.unwrap();
        let expected = if a.is_ok() { 10 } else { 90 };
        assert_eq!(players[0].number, Some(expected));
    }

    #[tokio::test]
    async fn test_reveal_requires_valid_token() {
        let engine = engine();
        let (code, _, ids) = room_with_players(&engine, &["Alice", "Bob", "Cara"]).await;
        for id in &ids {
            engine.submit_number(id, 50).await.unwrap();
        }

        let result = engine.reveal_results(&code, "wrong-token").await;
        assert!(matches!(result, Err(GameError::Unauthorized)));

        let missing = engine.reveal_results("ZZZZZZ", "whatever").await;
        assert!(matches!(missing, Err(GameError::RoomNotFound)));
    }

    #[tokio::test]
    async fn test_reveal_requires_three_players() {
        let engine = engine();
        let (code, token, ids) = room_with_players(&engine, &["Alice", "Bob"]).await;
        for id in &ids {
            engine.submit_number(id, 50).await.unwrap();
        }

        let result = engine.reveal_results(&code, &token).await;
        assert!(matches!(result, Err(GameError::NotEnoughPlayers)));
    }

    #[tokio::test]
    async fn test_reveal_requires_all_submissions() {
        let engine = engine();
        let (code, token, ids) = room_with_players(&engine, &["Alice", "Bob", "Cara"]).await;
        engine.submit_number(&ids[0], 30).await.unwrap();
        engine.submit_number(&ids[1], 60).await.unwrap();

        let result = engine.reveal_results(&code, &token).await;
        assert!(matches!(result, Err(GameError::IncompleteSubmissions)));
    }

    #[tokio::test]
    async fn test_reveal_is_one_way() {
        let engine = engine();
        let (code, token, ids) = room_with_players(&engine, &["Alice", "Bob", "Cara"]).await;
        for id in &ids {
            engine.submit_number(id, 50).await.unwrap();
        }

        engine.reveal_results(&code, &token).await.unwrap();
        let (room, _) = engine.get_room_data(&code).await.unwrap();
        assert_eq!(room.status, RoomStatus::Revealed);

        let again = engine.reveal_results(&code, &token).await;
        assert!(matches!(again, Err(GameError::AlreadyRevealed)));
    }

    #[tokio::test]
    async fn test_concurrent_reveals_single_winner() {
        let engine = engine();
        let (code, token, ids) = room_with_players(&engine, &["Alice", "Bob", "Cara"]).await;
        for id in &ids {
            engine.submit_number(id, 50).await.unwrap();
        }

        let (a, b) = tokio::join!(
            engine.reveal_results(&code, &token),
            engine.reveal_results(&code, &token)
        );
        // At least one must win; a loser sees AlreadyRevealed.
        assert!(a.is_ok() || b.is_ok());
        for r in [a, b] {
            if let Err(e) = r {
                assert!(matches!(e, GameError::AlreadyRevealed));
            }
        }
    }

    #[tokio::test]
    async fn test_join_after_reveal_rejected() {
        let engine = engine();
        let (code, token, ids) = room_with_players(&engine, &["Alice", "Bob", "Cara"]).await;
        for id in &ids {
            engine.submit_number(id, 50).await.unwrap();
        }
        engine.reveal_results(&code, &token).await.unwrap();

        let late = engine.join_room(&code, "Dave").await;
        assert!(matches!(late, Err(GameError::GameAlreadyEnded)));
    }

    #[tokio::test]
    async fn test_restart_clears_players_and_keeps_credentials() {
        let engine = engine();
        let (code, token, ids) = room_with_players(&engine, &["Alice", "Bob", "Cara"]).await;
        for id in &ids {
            engine.submit_number(id, 50).await.unwrap();
        }
        engine.reveal_results(&code, &token).await.unwrap();

        engine.restart_game(&code, &token).await.unwrap();

        let (room, players) = engine.get_room_data(&code).await.unwrap();
        assert_eq!(room.status, RoomStatus::Waiting);
        assert_eq!(room.code, code);
        assert!(players.is_empty());

        // Old names are free again, and the original token still works.
        let mut new_ids = Vec::new();
        for name in ["Alice", "Bob", "Cara"] {
            new_ids.push(engine.join_room(&code, name).await.unwrap());
        }
        for id in &new_ids {
            engine.submit_number(id, 10).await.unwrap();
        }
        engine.reveal_results(&code, &token).await.unwrap();
    }

    #[tokio::test]
    async fn test_restart_requires_valid_token() {
        let engine = engine();
        let (code, _, _) = room_with_players(&engine, &["Alice"]).await;

        let result = engine.restart_game(&code, "nope").await;
        assert!(matches!(result, Err(GameError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_restart_works_from_waiting() {
        // Restart is not gated on a reveal having happened.
        let engine = engine();
        let (code, token, _) = room_with_players(&engine, &["Alice", "Bob"]).await;

        engine.restart_game(&code, &token).await.unwrap();
        let (_, players) = engine.get_room_data(&code).await.unwrap();
        assert!(players.is_empty());
    }

    #[tokio::test]
    async fn test_mutations_emit_room_events() {
        let (engine, bus) = engine_with_bus();
        let (code, token, ids) = {
            let created = engine.create_room().await.unwrap();
            let mut ids = Vec::new();
            for name in ["Alice", "Bob", "Cara"] {
                ids.push(engine.join_room(&created.code, name).await.unwrap());
            }
            (created.code, created.host_token, ids)
        };

        let mut rx = bus.subscribe();
        for (i, id) in ids.iter().enumerate() {
            engine.submit_number(id, (i as i64 + 1) * 10).await.unwrap();
        }
        engine.reveal_results(&code, &token).await.unwrap();
        engine.restart_game(&code, &token).await.unwrap();

        let kinds: Vec<ChangeKind> = {
            let mut kinds = Vec::new();
            for _ in 0..5 {
                kinds.push(rx.recv().await.unwrap().kind);
            }
            kinds
        };
        assert_eq!(
            kinds,
            [
                ChangeKind::Player,
                ChangeKind::Player,
                ChangeKind::Player,
                ChangeKind::Room,
                ChangeKind::Room
            ]
        );
    }
}
