//! Lobby events: room creation, joining (and reconnection), readiness and
//! team configuration, and departures.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::tasks::RECONNECT_GRACE;
use super::{GameFlowService, RoomTask};
use crate::domain::state::GameMode;
use crate::rooms::room::{JoinOutcome, LeaveOutcome};
use crate::rooms::{RoomError, RoomHandle};
use crate::ws::protocol::AckBody;

impl GameFlowService {
    pub fn create_room(&self, session_id: Uuid, player_name: &str, mode: GameMode) -> AckBody {
        match self.rooms.create(session_id, player_name, mode) {
            Ok(handle) => {
                let room = handle.lock();
                self.broadcast_room(&room);
                AckBody::ok("create-room", handle.code())
            }
            Err(err) => AckBody::err("create-room", err),
        }
    }

    /// Join a lobby, or reconnect into a running game under the same name.
    pub fn join_room(self: &Arc<Self>, session_id: Uuid, code: &str, name: &str) -> AckBody {
        let Some(handle) = self.rooms.get(code) else {
            return AckBody::err("join-room", RoomError::RoomNotFound);
        };
        let mut room = handle.lock();
        if room.closed {
            return AckBody::err("join-room", RoomError::RoomNotFound);
        }
        match room.join(session_id, name) {
            Ok(outcome) => {
                let reconnected = outcome == JoinOutcome::Reconnected;
                info!(code = handle.code(), player = name, reconnected, "player joined");
                self.broadcast_room(&room);
                // A reconnect may land mid-settlement; someone else's turn
                // could still be parked on a disconnected seat.
                self.check_disconnected(&room);
                AckBody::rejoined("join-room", handle.code(), reconnected)
            }
            Err(err) => AckBody::err("join-room", err),
        }
    }

    pub fn toggle_ready(&self, session_id: Uuid, code: &str) {
        let Some(handle) = self.rooms.get(code) else {
            return;
        };
        let mut room = handle.lock();
        if room.closed || room.started {
            return;
        }
        room.toggle_ready(session_id);
        self.broadcast_room(&room);
    }

    pub fn set_game_mode(&self, session_id: Uuid, code: &str, mode: GameMode) {
        let Some(handle) = self.rooms.get(code) else {
            return;
        };
        let mut room = handle.lock();
        if room.closed || room.started || room.player_by_id(session_id).is_none() {
            return;
        }
        room.set_game_mode(mode);
        self.broadcast_room(&room);
    }

    pub fn assign_team(&self, session_id: Uuid, code: &str, player_name: &str, team_name: &str) {
        let Some(handle) = self.rooms.get(code) else {
            return;
        };
        let mut room = handle.lock();
        if room.closed || room.started || room.player_by_id(session_id).is_none() {
            return;
        }
        match room.assign_team(player_name, team_name) {
            Ok(()) => self.broadcast_room(&room),
            Err(err) => debug!(code = handle.code(), %err, "team assignment ignored"),
        }
    }

    pub fn update_teams(&self, session_id: Uuid, code: &str, num_teams: usize) {
        let Some(handle) = self.rooms.get(code) else {
            return;
        };
        let mut room = handle.lock();
        if room.closed || room.started || room.player_by_id(session_id).is_none() {
            return;
        }
        room.update_teams(num_teams);
        self.broadcast_room(&room);
    }

    /// Explicit lobby departure. During a game this behaves like a dropped
    /// connection: the seat is retained for reconnection.
    pub fn leave_room(self: &Arc<Self>, session_id: Uuid, code: &str) {
        let Some(handle) = self.rooms.get(code) else {
            return;
        };
        self.depart(&handle, session_id);
    }

    /// Connection teardown: resolve the session to its room and depart.
    pub fn handle_disconnect(self: &Arc<Self>, session_id: Uuid) {
        let Some(handle) = self.rooms.find_player_room(session_id) else {
            return;
        };
        self.depart(&handle, session_id);
    }

    fn depart(self: &Arc<Self>, handle: &Arc<RoomHandle>, session_id: Uuid) {
        let mut room = handle.lock();
        if room.closed {
            return;
        }
        match room.leave(session_id) {
            LeaveOutcome::Removed { room_empty: true } => {
                drop(room);
                self.rooms.remove(handle.code());
            }
            LeaveOutcome::Removed { room_empty: false } => {
                self.broadcast_room(&room);
            }
            LeaveOutcome::Disconnected => {
                info!(code = handle.code(), "player disconnected mid-game");
                self.broadcast_room(&room);
                // Give the player a grace window to reconnect before the
                // server starts acting for them.
                self.schedule(handle.code(), RoomTask::DisconnectCheck, RECONNECT_GRACE);
            }
            LeaveOutcome::NotMember => {}
        }
    }
}
