//! Shared application state

use std::sync::Arc;

use crate::engine::RoomEngine;
use crate::notify::EventBus;
use crate::store::{MemoryStore, RoomStore};

pub struct AppState {
    pub engine: RoomEngine,
    /// Change events for WebSocket fan-out; the engine publishes through the
    /// same bus behind its notifier seam.
    pub events: EventBus,
}

impl AppState {
    /// State backed by the bundled in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// State backed by a caller-provided store.
    pub fn with_store(store: Arc<dyn RoomStore>) -> Self {
        let events = EventBus::default();
        let engine = RoomEngine::new(store, Arc::new(events.clone()));
        Self { engine, events }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
