//! In-game player events: nil decisions, bids and card plays.
//!
//! Error policy by kind: wrong-phase or out-of-turn events are stale and
//! dropped; play/bid legality failures answer the caller alone with
//! `invalid-play`; nothing here ever mutates state on a failed validation.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::tasks::TRICK_SETTLE_DELAY;
use super::{GameFlowService, RoomTask};
use crate::domain::tricks::{self, PlayOutcome};
use crate::domain::{bidding, Phase};
use crate::errors::domain::ValidationKind;
use crate::ws::protocol::ServerMsg;

impl GameFlowService {
    pub fn nil_decision(self: &Arc<Self>, session_id: Uuid, code: &str, go_nil: bool) {
        let Some(handle) = self.rooms.get(code) else {
            return;
        };
        let mut room = handle.lock();
        if room.closed {
            return;
        }
        let Some(name) = room.name_of(session_id).map(str::to_string) else {
            return;
        };
        let Some(game) = room.game.as_mut() else {
            return;
        };
        match bidding::nil_decision(game, &name, go_nil) {
            Ok(()) => {
                info!(code = handle.code(), player = %name, go_nil, "nil decision");
                self.broadcast_room(&room);
                self.check_disconnected(&room);
            }
            Err(err) => debug!(code = handle.code(), %err, "stale nil decision dropped"),
        }
    }

    pub fn place_bid(self: &Arc<Self>, session_id: Uuid, code: &str, bid: u8) {
        let Some(handle) = self.rooms.get(code) else {
            return;
        };
        let mut room = handle.lock();
        if room.closed {
            return;
        }
        let Some(name) = room.name_of(session_id).map(str::to_string) else {
            return;
        };
        let Some(game) = room.game.as_mut() else {
            return;
        };
        match bidding::place_bid(game, &name, bid) {
            Ok(()) => {
                info!(code = handle.code(), player = %name, bid, "bid placed");
                self.broadcast_room(&room);
                self.check_disconnected(&room);
            }
            Err(err) => match err.kind {
                ValidationKind::InvalidBid | ValidationKind::NilLocked => {
                    self.registry.send(
                        session_id,
                        ServerMsg::InvalidPlay {
                            message: err.to_string(),
                        },
                    );
                }
                _ => debug!(code = handle.code(), %err, "stale bid dropped"),
            },
        }
    }

    /// Card plays contend optimistically: a play that arrives while another
    /// event holds the room lock has already lost the race and is dropped;
    /// the client's next snapshot supersedes it.
    pub fn play_card(self: &Arc<Self>, session_id: Uuid, code: &str, card_id: u8) {
        let Some(handle) = self.rooms.get(code) else {
            return;
        };
        let Some(mut room) = handle.try_lock() else {
            debug!(code, card_id, "contended card play dropped");
            return;
        };
        if room.closed {
            return;
        }
        let Some(name) = room.name_of(session_id).map(str::to_string) else {
            return;
        };
        let Some(game) = room.game.as_mut() else {
            return;
        };
        match tricks::play_card(game, &name, card_id) {
            Ok(PlayOutcome::TrickFull) => {
                let round = game.current_round;
                let trick_number = game.trick_number;
                info!(code = handle.code(), player = %name, card_id, "trick full");
                // Everyone sees the completed trick before it settles.
                self.broadcast_room(&room);
                self.schedule(
                    handle.code(),
                    RoomTask::SettleTrick {
                        round,
                        trick_number,
                    },
                    TRICK_SETTLE_DELAY,
                );
            }
            Ok(PlayOutcome::TurnAdvanced) => {
                self.broadcast_room(&room);
                self.check_disconnected(&room);
            }
            Err(err) => match err.kind {
                ValidationKind::CardNotInHand | ValidationKind::MustFollowSuit => {
                    self.registry.send(
                        session_id,
                        ServerMsg::InvalidPlay {
                            message: err.to_string(),
                        },
                    );
                }
                _ => debug!(code = handle.code(), %err, "stale card play dropped"),
            },
        }
    }

    /// Host acknowledges the round summary and deals the next round.
    pub fn next_round(self: &Arc<Self>, session_id: Uuid, code: &str) {
        let Some(handle) = self.rooms.get(code) else {
            return;
        };
        let mut room = handle.lock();
        if room.closed || !room.is_host(session_id) {
            return;
        }
        let Some(game) = room.game.as_mut() else {
            return;
        };
        if game.phase != Phase::RoundEnd || game.game_over {
            return;
        }
        if let Err(err) = crate::domain::rounds::start_round(game, &mut rand::rng()) {
            debug!(code = handle.code(), %err, "next round failed to start");
            return;
        }
        let round = game.current_round;
        info!(code = handle.code(), round, "next round dealt");
        self.broadcast_room(&room);
        self.check_disconnected(&room);
    }
}
