//! Process-wide rooms table. The table itself only needs coarse
//! synchronization for insert/lookup/delete; each room's state sits behind
//! its own mutex, which serializes every transition touching that room.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};
use tracing::info;
use uuid::Uuid;

use crate::domain::state::GameMode;
use crate::rooms::error::RoomError;
use crate::rooms::room::{validate_name, Room};
use crate::utils::join_code::generate_room_code;

#[derive(Debug)]
pub struct RoomHandle {
    code: String,
    state: Mutex<Room>,
}

impl RoomHandle {
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Blocking acquisition: the whole transition, fan-out included, runs
    /// under this guard.
    pub fn lock(&self) -> MutexGuard<'_, Room> {
        self.state.lock()
    }

    /// Non-blocking acquisition for optimistic events (card plays): a
    /// contended play has already lost the race and is dropped.
    pub fn try_lock(&self) -> Option<MutexGuard<'_, Room>> {
        self.state.try_lock()
    }
}

#[derive(Default)]
pub struct RoomManager {
    rooms: DashMap<String, Arc<RoomHandle>>,
}

impl RoomManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room under a fresh code, retrying on the (unlikely) code
    /// collision.
    pub fn create(
        &self,
        host_id: Uuid,
        host_name: &str,
        mode: GameMode,
    ) -> Result<Arc<RoomHandle>, RoomError> {
        validate_name(host_name)?;
        loop {
            let code = generate_room_code();
            match self.rooms.entry(code.clone()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    let room = Room::new(code.clone(), host_id, host_name, mode);
                    let handle = Arc::new(RoomHandle {
                        code,
                        state: Mutex::new(room),
                    });
                    slot.insert(handle.clone());
                    info!(code = handle.code(), host = host_name, "room created");
                    return Ok(handle);
                }
            }
        }
    }

    pub fn get(&self, code: &str) -> Option<Arc<RoomHandle>> {
        let code = normalize(code);
        self.rooms.get(&code).map(|entry| entry.value().clone())
    }

    /// Tear a room down. Late events holding the stale handle observe
    /// `closed` and become no-ops. Callers must not hold the room lock.
    pub fn remove(&self, code: &str) {
        let code = normalize(code);
        if let Some((_, handle)) = self.rooms.remove(&code) {
            handle.lock().closed = true;
            info!(code = %code, "room removed");
        }
    }

    /// Linear scan over rooms; the table is small and this only runs on
    /// connection teardown.
    pub fn find_player_room(&self, session_id: Uuid) -> Option<Arc<RoomHandle>> {
        for entry in self.rooms.iter() {
            let handle = entry.value();
            if handle.lock().players.iter().any(|p| p.id == session_id) {
                return Some(handle.clone());
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
