//! Auto-progress for disconnected seats, so a game can always move.
//!
//! Policy: a disconnected current actor auto-plays the first legal card in
//! hand order, auto-bids zero, and declines nil. Each action re-broadcasts
//! and re-checks; the loop is bounded by the seat count so a table of ghosts
//! cannot spin forever.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use super::tasks::{AUTO_ADVANCE_DELAY, TRICK_SETTLE_DELAY};
use super::{GameFlowService, RoomTask};
use crate::domain::state::{Game, NilChoice, Phase};
use crate::domain::tricks::{self, legal_plays, PlayOutcome};
use crate::domain::{bidding, Card};
use crate::rooms::Room;

enum AutoStep {
    Acted,
    TrickFull { round: u8, trick_number: u8 },
    Idle,
}

impl GameFlowService {
    /// Schedule a disconnect check if the game is parked on an absent seat.
    /// Called after any transition that may have moved the turn.
    pub(crate) fn check_disconnected(self: &Arc<Self>, room: &Room) {
        let Some(game) = &room.game else {
            return;
        };
        let connected = connected_names(room);
        let parked = match game.phase {
            Phase::NilPrompt => game
                .nil_bids
                .iter()
                .any(|(p, c)| *c == NilChoice::Undecided && !connected.contains(p.as_str())),
            Phase::Bidding | Phase::Playing => game
                .current_player()
                .is_some_and(|p| !connected.contains(p)),
            _ => false,
        };
        if parked {
            self.schedule(&room.code, RoomTask::DisconnectCheck, AUTO_ADVANCE_DELAY);
        }
    }

    /// Act for disconnected seats until the game is unparked, a trick fills,
    /// or the iteration bound runs out.
    pub(super) fn run_disconnect_check(self: &Arc<Self>, room: &mut Room) {
        let bound = room.players.len();
        for _ in 0..bound {
            let connected = connected_names(room);
            let step = {
                let Some(game) = room.game.as_mut() else {
                    return;
                };
                auto_step(game, &connected)
            };
            match step {
                AutoStep::Idle => return,
                AutoStep::Acted => {
                    self.broadcast_room(room);
                }
                AutoStep::TrickFull {
                    round,
                    trick_number,
                } => {
                    self.broadcast_room(room);
                    self.schedule(
                        &room.code,
                        RoomTask::SettleTrick {
                            round,
                            trick_number,
                        },
                        TRICK_SETTLE_DELAY,
                    );
                    return;
                }
            }
        }
    }
}

fn connected_names(room: &Room) -> HashSet<String> {
    room.players
        .iter()
        .filter(|p| p.connected)
        .map(|p| p.name.clone())
        .collect()
}

fn auto_step(game: &mut Game, connected: &HashSet<String>) -> AutoStep {
    match game.phase {
        Phase::NilPrompt => {
            let pending: Vec<String> = game
                .nil_bids
                .iter()
                .filter(|(p, c)| **c == NilChoice::Undecided && !connected.contains(*p))
                .map(|(p, _)| p.clone())
                .collect();
            if pending.is_empty() {
                return AutoStep::Idle;
            }
            for player in &pending {
                // Absent players never go nil; they just see their cards.
                match bidding::nil_decision(game, player, false) {
                    Ok(()) => info!(player = %player, "auto-declined nil for absent player"),
                    Err(err) => warn!(player = %player, %err, "auto nil decision refused"),
                }
            }
            AutoStep::Acted
        }
        Phase::Bidding => {
            let Some(player) = game.current_player().map(str::to_string) else {
                return AutoStep::Idle;
            };
            if connected.contains(&player) {
                return AutoStep::Idle;
            }
            match bidding::place_bid(game, &player, 0) {
                Ok(()) => {
                    info!(player = %player, "auto-bid zero for absent player");
                    AutoStep::Acted
                }
                Err(err) => {
                    warn!(player = %player, %err, "auto-bid refused");
                    AutoStep::Idle
                }
            }
        }
        Phase::Playing => {
            let Some(player) = game.current_player().map(str::to_string) else {
                return AutoStep::Idle;
            };
            if connected.contains(&player) {
                return AutoStep::Idle;
            }
            let Some(card) = first_legal_card(game, &player) else {
                return AutoStep::Idle;
            };
            match tricks::play_card(game, &player, card.id) {
                Ok(PlayOutcome::TrickFull) => {
                    info!(player = %player, card_id = card.id, "auto-played into a full trick");
                    AutoStep::TrickFull {
                        round: game.current_round,
                        trick_number: game.trick_number,
                    }
                }
                Ok(PlayOutcome::TurnAdvanced) => {
                    info!(player = %player, card_id = card.id, "auto-played for absent player");
                    AutoStep::Acted
                }
                Err(err) => {
                    warn!(player = %player, %err, "auto-play refused");
                    AutoStep::Idle
                }
            }
        }
        _ => AutoStep::Idle,
    }
}

/// First card in hand order that satisfies the follow-suit rule.
fn first_legal_card(game: &Game, player: &str) -> Option<Card> {
    let hand = game.hands.get(player)?;
    legal_plays(hand, game.led_suit).first().copied()
}
