//! Fan-out. All sends happen while the caller still holds the room lock, so
//! every client observes snapshots in transition order.

use super::GameFlowService;
use crate::domain::snapshot::GameStateView;
use crate::rooms::Room;
use crate::ws::protocol::ServerMsg;

impl GameFlowService {
    /// Standard post-transition broadcast: membership data to the whole
    /// room, then a per-player redacted game snapshot when a game exists.
    /// Disconnected seats are skipped; they resynchronize on rejoin.
    pub(super) fn broadcast_room(&self, room: &Room) {
        let update = ServerMsg::RoomUpdate(room.view());
        for player in room.players.iter().filter(|p| p.connected) {
            self.registry.send(player.id, update.clone());
        }

        if let Some(game) = &room.game {
            for player in room.players.iter().filter(|p| p.connected) {
                let snapshot = GameStateView::for_player(game, &player.name);
                self.registry.send(player.id, ServerMsg::GameState(snapshot));
            }
        }
    }

    /// Send one identical message to every connected member.
    pub(super) fn broadcast_msg(&self, room: &Room, msg: &ServerMsg) {
        for player in room.players.iter().filter(|p| p.connected) {
            self.registry.send(player.id, msg.clone());
        }
    }
}
