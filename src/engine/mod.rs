//! Room lifecycle engine.
//!
//! Owns the waiting -> revealed -> (restart) -> waiting state machine and
//! its authorization rules. The engine itself is stateless: all shared
//! state lives behind the [`RoomStore`] seam, so any number of engine
//! instances can run against the same store. Every accepted mutation emits
//! one change notification for the room.

mod room;
mod round;

pub use room::CreatedRoom;

use std::sync::Arc;

use crate::notify::ChangeNotifier;
use crate::store::RoomStore;

#[derive(Clone)]
pub struct RoomEngine {
    store: Arc<dyn RoomStore>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl RoomEngine {
    pub fn new(store: Arc<dyn RoomStore>, notifier: Arc<dyn ChangeNotifier>) -> Self {
        Self { store, notifier }
    }
}
