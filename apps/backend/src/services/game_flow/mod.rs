//! Session orchestrator: binds client events to the room manager and game
//! engine under per-room serialization, fans out per-player snapshots, and
//! drives the paced settlement and auto-progress timers.
//!
//! Locking discipline: every event, timer callback and disconnect handler
//! runs its whole transition under the room's mutex, fan-out included.
//! Handlers never suspend while holding the lock; timers are registered
//! outside it and contend like any other event when they fire.

mod autoplay;
mod broadcast;
mod lobby;
mod player_actions;
mod round_lifecycle;
mod tasks;


use std::sync::Arc;

use crate::rooms::RoomManager;
use crate::ws::hub::SessionRegistry;

pub use tasks::RoomTask;

pub struct GameFlowService {
    rooms: RoomManager,
    registry: Arc<SessionRegistry>,
}

impl GameFlowService {
    pub fn new(registry: Arc<SessionRegistry>) -> Arc<Self> {
        Arc::new(Self {
            rooms: RoomManager::new(),
            registry,
        })
    }

    pub fn rooms(&self) -> &RoomManager {
        &self.rooms
    }
}
