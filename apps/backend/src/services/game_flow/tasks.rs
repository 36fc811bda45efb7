//! Scheduled work items. Delays are client pacing, never correctness: each
//! task re-looks the room up by code, re-acquires the lock and validates the
//! state it captured. A deleted room or a stale guard makes a task a no-op.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::GameFlowService;
use crate::domain::state::Phase;
use crate::domain::{rounds, tricks};
use crate::rooms::Room;
use crate::ws::protocol::ServerMsg;

/// Pause between the full-trick snapshot and resolution.
pub(super) const TRICK_SETTLE_DELAY: Duration = Duration::from_millis(500);
/// Pause between the trick result and the next-trick snapshot.
pub(super) const NEXT_TRICK_DELAY: Duration = Duration::from_millis(1500);
/// Pause between the final trick result and the round summary.
pub(super) const ROUND_END_DELAY: Duration = Duration::from_millis(2000);
/// Re-check delay when a transition lands the turn on a disconnected seat.
pub(super) const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(300);
/// Grace window for a dropped player to reconnect before auto-play begins.
pub(super) const RECONNECT_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomTask {
    /// Resolve the trick captured at `(round, trick_number)`.
    SettleTrick { round: u8, trick_number: u8 },
    /// Broadcast the cleared table for the next trick of `round`.
    AfterTrick { round: u8 },
    /// Score the finished `round`.
    ResolveRound { round: u8 },
    /// Act for disconnected seats if the game is parked on one.
    DisconnectCheck,
}

impl GameFlowService {
    pub(crate) fn schedule(self: &Arc<Self>, code: &str, task: RoomTask, delay: Duration) {
        let flow = Arc::clone(self);
        let code = code.to_string();
        actix_web::rt::spawn(async move {
            tokio::time::sleep(delay).await;
            flow.run_task(&code, task);
        });
    }

    /// Run a scheduled transition now. Public so tests can drive settlement
    /// without waiting out the pacing delays.
    pub fn run_task(self: &Arc<Self>, code: &str, task: RoomTask) {
        let Some(handle) = self.rooms.get(code) else {
            return;
        };
        let mut room = handle.lock();
        if room.closed || !room.started {
            return;
        }
        match task {
            RoomTask::SettleTrick {
                round,
                trick_number,
            } => self.settle_trick(&mut room, round, trick_number),
            RoomTask::AfterTrick { round } => self.after_trick(&mut room, round),
            RoomTask::ResolveRound { round } => self.settle_round(&mut room, round),
            RoomTask::DisconnectCheck => self.run_disconnect_check(&mut room),
        }
    }

    fn settle_trick(self: &Arc<Self>, room: &mut Room, round: u8, trick_number: u8) {
        let code = room.code.clone();
        let Some(game) = room.game.as_mut() else {
            return;
        };
        let fresh = game.phase == Phase::Playing
            && game.current_round == round
            && game.trick_number == trick_number
            && game.current_trick.len() >= game.seat_count();
        if !fresh {
            return;
        }

        let result = match tricks::resolve_trick(game) {
            Ok(result) => result,
            Err(err) => {
                warn!(code = %code, %err, "trick resolution refused");
                return;
            }
        };
        info!(code = %code, winner = %result.winner, round, "trick resolved");

        let round_complete = result.round_complete;
        let msg = ServerMsg::TrickResult {
            winner: result.winner,
            winning_card: result.winning_card,
            trick: result.plays,
        };
        self.broadcast_msg(room, &msg);

        if round_complete {
            self.schedule(&code, RoomTask::ResolveRound { round }, ROUND_END_DELAY);
        } else {
            self.schedule(&code, RoomTask::AfterTrick { round }, NEXT_TRICK_DELAY);
        }
    }

    fn after_trick(self: &Arc<Self>, room: &mut Room, round: u8) {
        let fresh = matches!(
            &room.game,
            Some(game)
                if game.phase == Phase::Playing
                    && game.current_round == round
                    && game.current_trick.is_empty()
        );
        if !fresh {
            return;
        }
        self.broadcast_room(room);
        self.check_disconnected(room);
    }

    fn settle_round(self: &Arc<Self>, room: &mut Room, round: u8) {
        let code = room.code.clone();
        let Some(game) = room.game.as_mut() else {
            return;
        };
        if game.phase != Phase::Playing || game.current_round != round {
            return;
        }
        let summary = match rounds::resolve_round(game) {
            Ok(summary) => summary,
            Err(err) => {
                warn!(code = %code, %err, "round resolution refused");
                return;
            }
        };
        info!(
            code = %code,
            round = summary.round,
            game_over = summary.game_over,
            "round resolved"
        );

        // Unit-level totals: players individually, or teams when teams play.
        let (scores, round_history) = if game.teams.is_empty() {
            (game.scores.clone(), game.round_history.clone())
        } else {
            (game.team_scores.clone(), game.team_round_history.clone())
        };
        let msg = ServerMsg::RoundEnd {
            round: summary.round,
            round_scores: summary.round_scores,
            scores,
            penalties: summary.penalties,
            round_history,
        };
        self.broadcast_msg(room, &msg);
        self.broadcast_room(room);
    }
}
