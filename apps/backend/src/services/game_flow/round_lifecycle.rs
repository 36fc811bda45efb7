//! Host-gated lifecycle events: starting, restarting and ending a game.
//! Non-host attempts are ignored; the client UI gates these requests.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::GameFlowService;
use crate::domain::state::{Game, GameMode};
use crate::domain::rounds;
use crate::ws::protocol::ServerMsg;

impl GameFlowService {
    pub fn start_game(self: &Arc<Self>, session_id: Uuid, code: &str) {
        let Some(handle) = self.rooms.get(code) else {
            return;
        };
        let mut room = handle.lock();
        if room.closed || room.started || !room.is_host(session_id) {
            return;
        }
        if let Err(err) = room.can_start() {
            debug!(code = handle.code(), %err, "start refused");
            return;
        }

        let order: Vec<String> = room.players.iter().map(|p| p.name.clone()).collect();
        let teams = if room.game_mode == GameMode::Teams {
            room.teams.clone()
        } else {
            Vec::new()
        };
        let mut game = Game::new(order, room.game_mode, teams);
        if let Err(err) = rounds::start_round(&mut game, &mut rand::rng()) {
            warn!(code = handle.code(), %err, "could not deal the opening round");
            return;
        }

        room.started = true;
        room.game = Some(game);
        info!(code = handle.code(), players = room.players.len(), "game started");
        self.broadcast_room(&room);
        self.check_disconnected(&room);
    }

    /// Reset to the lobby, keeping connected members.
    pub fn restart_game(&self, session_id: Uuid, code: &str) {
        let Some(handle) = self.rooms.get(code) else {
            return;
        };
        let mut room = handle.lock();
        if room.closed || !room.started || !room.is_host(session_id) {
            return;
        }
        room.reset();
        info!(code = handle.code(), "game reset to lobby");
        self.broadcast_msg(&room, &ServerMsg::GameReset);
        self.broadcast_room(&room);
    }

    /// Tear the room down entirely. Members get `game-ended` before the
    /// room disappears; their sockets stay open for a new room.
    pub fn end_game(&self, session_id: Uuid, code: &str) {
        let Some(handle) = self.rooms.get(code) else {
            return;
        };
        {
            let room = handle.lock();
            if room.closed || !room.is_host(session_id) {
                return;
            }
            self.broadcast_msg(&room, &ServerMsg::GameEnded);
        }
        self.rooms.remove(handle.code());
        info!(code = handle.code(), "game ended by host");
    }

    /// Explicit mid-game leave: the seat is gone for good, the game shrinks
    /// around it.
    pub fn leave_game(self: &Arc<Self>, session_id: Uuid, code: &str) {
        let Some(handle) = self.rooms.get(code) else {
            return;
        };
        let mut room = handle.lock();
        if room.closed {
            return;
        }
        let outcome = room.remove_from_game(session_id);
        let Some(name) = outcome.removed_name else {
            return;
        };
        info!(code = handle.code(), player = %name, "player left the game");
        if outcome.room_empty {
            drop(room);
            self.rooms.remove(handle.code());
            return;
        }
        self.broadcast_room(&room);
        self.check_disconnected(&room);
    }
}
