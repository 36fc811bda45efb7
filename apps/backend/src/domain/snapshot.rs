//! Per-viewer snapshot of a game: everything public, plus the viewer's own
//! hand. Other hands are reduced to counts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::cards::{sort_hand, Card, Suit};
use crate::domain::state::{
    Game, GameMode, NilChoice, Phase, RoundRecord, Team, TrickPlay, Winner,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateView {
    pub game_mode: GameMode,
    pub current_round: u8,
    pub phase: Phase,
    pub player_order: Vec<String>,
    pub dealer_index: usize,
    pub bidding_start_index: usize,
    pub first_lead_index: usize,
    pub current_player_index: usize,
    pub current_player: Option<String>,

    /// The viewer's own cards, sorted for display. Empty while the viewer
    /// still owes a nil decision (nil is declared before seeing cards).
    pub hand: Vec<Card>,
    pub other_hand_counts: HashMap<String, usize>,

    pub bids: HashMap<String, u8>,
    pub nil_bids: HashMap<String, NilChoice>,
    pub tricks_won: HashMap<String, u8>,
    pub current_trick: Vec<TrickPlay>,
    pub trick_number: u8,
    pub led_suit: Option<Suit>,
    pub spades_broken: bool,
    pub last_trick_winner: Option<String>,

    pub scores: HashMap<String, i32>,
    pub overtrick_bag: HashMap<String, u32>,
    pub round_history: HashMap<String, Vec<RoundRecord>>,

    pub teams: Vec<Team>,
    pub team_scores: HashMap<String, i32>,
    pub team_overtrick_bag: HashMap<String, u32>,
    pub team_round_history: HashMap<String, Vec<RoundRecord>>,

    pub game_over: bool,
    pub winner: Option<Winner>,
}

impl GameStateView {
    /// Redact `game` for one recipient.
    pub fn for_player(game: &Game, viewer: &str) -> Self {
        let undecided_nil = game.phase == Phase::NilPrompt
            && game.nil_bids.get(viewer) == Some(&NilChoice::Undecided);

        let hand = if undecided_nil {
            Vec::new()
        } else {
            let mut hand = game.hands.get(viewer).cloned().unwrap_or_default();
            sort_hand(&mut hand);
            hand
        };

        let other_hand_counts = game
            .player_order
            .iter()
            .filter(|p| p.as_str() != viewer)
            .map(|p| {
                let count = game.hands.get(p).map_or(0, Vec::len);
                (p.clone(), count)
            })
            .collect();

        Self {
            game_mode: game.mode,
            current_round: game.current_round,
            phase: game.phase,
            player_order: game.player_order.clone(),
            dealer_index: game.dealer_index,
            bidding_start_index: game.bidding_start_index,
            first_lead_index: game.first_lead_index,
            current_player_index: game.current_player_index,
            current_player: game.current_player().map(str::to_string),
            hand,
            other_hand_counts,
            bids: game.bids.clone(),
            nil_bids: game.nil_bids.clone(),
            tricks_won: game.tricks_won.clone(),
            current_trick: game.current_trick.clone(),
            trick_number: game.trick_number,
            led_suit: game.led_suit,
            spades_broken: game.spades_broken,
            last_trick_winner: game.last_trick_winner.clone(),
            scores: game.scores.clone(),
            overtrick_bag: game.overtrick_bag.clone(),
            round_history: game.round_history.clone(),
            teams: game.teams.clone(),
            team_scores: game.team_scores.clone(),
            team_overtrick_bag: game.team_overtrick_bag.clone(),
            team_round_history: game.team_round_history.clone(),
            game_over: game.game_over,
            winner: game.winner.clone(),
        }
    }
}
