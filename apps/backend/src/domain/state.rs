//! Game snapshot types. The `Game` struct is a plain tree of data; every
//! transition over it lives in `bidding`, `tricks` and `rounds`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::cards::{Card, Suit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    NilPrompt,
    Bidding,
    Playing,
    RoundEnd,
    GameOver,
}

/// Three-valued nil state: a player who has not yet answered the prompt is
/// `Undecided`, not merely absent from the map.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NilChoice {
    Undecided,
    Nil,
    SeeCards,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Individual,
    Teams,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub name: String,
    pub members: Vec<String>,
}

/// One card put down in the current trick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickPlay {
    pub player: String,
    pub card: Card,
}

/// One scoring row. Players get one per round; in team mode each team gets
/// its own row keyed in `team_round_history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub round: u8,
    pub bid: u8,
    pub tricks_won: u8,
    /// `Some(success)` for a nil row, `None` otherwise.
    pub nil: Option<bool>,
    pub round_score: i32,
    pub penalty_applied: bool,
    pub total_after: i32,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinnerKind {
    Individual,
    Team,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    pub name: String,
    pub score: i32,
    #[serde(rename = "type")]
    pub kind: WinnerKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub mode: GameMode,
    pub current_round: u8,
    pub phase: Phase,

    /// Fixed cyclic seating for the whole game; names are the stable
    /// identity (session ids change on reconnect).
    pub player_order: Vec<String>,
    pub dealer_index: usize,
    pub bidding_start_index: usize,
    pub first_lead_index: usize,
    pub current_player_index: usize,

    pub hands: HashMap<String, Vec<Card>>,
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

impl Game {
    /// Fresh game for the given seating. `rounds::start_round` must be called
    /// before the first event is accepted.
    pub fn new(player_order: Vec<String>, mode: GameMode, teams: Vec<Team>) -> Self {
        let scores = player_order.iter().map(|p| (p.clone(), 0)).collect();
        let overtrick_bag = player_order.iter().map(|p| (p.clone(), 0)).collect();
        let round_history = player_order
            .iter()
            .map(|p| (p.clone(), Vec::new()))
            .collect();
        let team_scores = teams.iter().map(|t| (t.name.clone(), 0)).collect();
        let team_overtrick_bag = teams.iter().map(|t| (t.name.clone(), 0)).collect();
        let team_round_history = teams.iter().map(|t| (t.name.clone(), Vec::new())).collect();

        Self {
            mode,
            current_round: 1,
            phase: Phase::Bidding,
            player_order,
            dealer_index: 0,
            bidding_start_index: 0,
            first_lead_index: 0,
            current_player_index: 0,
            hands: HashMap::new(),
            bids: HashMap::new(),
            nil_bids: HashMap::new(),
            tricks_won: HashMap::new(),
            current_trick: Vec::new(),
            trick_number: 0,
            led_suit: None,
            spades_broken: false,
            last_trick_winner: None,
            scores,
            overtrick_bag,
            round_history,
            teams,
            team_scores,
            team_overtrick_bag,
            team_round_history,
            game_over: false,
            winner: None,
        }
    }

    pub fn current_player(&self) -> Option<&str> {
        self.player_order
            .get(self.current_player_index)
            .map(String::as_str)
    }

    pub fn seat_of(&self, name: &str) -> Option<usize> {
        self.player_order.iter().position(|p| p == name)
    }

    pub fn seat_count(&self) -> usize {
        self.player_order.len()
    }

    pub(crate) fn advance_turn(&mut self) {
        if !self.player_order.is_empty() {
            self.current_player_index = (self.current_player_index + 1) % self.player_order.len();
        }
    }

    /// Card conservation: dealt cards are exactly split between hands, the
    /// trick in flight, and tricks already resolved. Only meaningful while
    /// all original seats are occupied; a mid-game leaver takes their cards
    /// out of circulation.
    pub(crate) fn debug_assert_conservation(&self) {
        #[cfg(debug_assertions)]
        {
            if self.hands.len() != self.player_order.len() {
                return;
            }
            if !matches!(self.phase, Phase::Playing | Phase::Bidding | Phase::NilPrompt) {
                return;
            }
            let n = self.player_order.len();
            let held: usize = self
                .player_order
                .iter()
                .filter_map(|p| self.hands.get(p))
                .map(Vec::len)
                .sum();
            let accounted = held + self.trick_number as usize * n + self.current_trick.len();
            debug_assert_eq!(
                accounted,
                self.current_round as usize * n,
                "card conservation violated in round {}",
                self.current_round
            );
        }
    }
}
