//! Round lifecycle: (re)initializing a round and settling it into scores.

use std::collections::HashMap;

use rand::Rng;

use crate::domain::dealing::deal;
use crate::domain::rules::{cards_per_player, nil_offered, MAX_ROUNDS};
use crate::domain::scoring::{score_nil, score_non_nil, settle_total};
use crate::domain::state::{Game, NilChoice, Phase, RoundRecord, Winner, WinnerKind};
use crate::errors::domain::{DomainError, ValidationKind};

/// What `resolve_round` produced, for the `round-end` broadcast.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub round: u8,
    /// Per-unit round deltas (players in Individual mode, teams in Teams).
    pub round_scores: HashMap<String, i32>,
    /// Units hit by the denominator penalty this round.
    pub penalties: Vec<String>,
    pub game_over: bool,
}

/// (Re)initialize the game for `current_round`: deal, reset per-round state,
/// rotate the dealer and seat the opening actor. Rounds 10 and 11 open with
/// the nil prompt; earlier rounds go straight to bidding.
pub fn start_round<R: Rng + ?Sized>(game: &mut Game, rng: &mut R) -> Result<(), DomainError> {
    let round_no = game.current_round;
    let n = game.seat_count();
    if n == 0 {
        return Err(DomainError::validation(
            ValidationKind::UnknownPlayer,
            "No players seated",
        ));
    }

    game.hands = deal(&game.player_order, cards_per_player(round_no), rng)?;
    game.bids.clear();
    game.tricks_won = game.player_order.iter().map(|p| (p.clone(), 0)).collect();
    game.current_trick.clear();
    game.led_suit = None;
    game.spades_broken = false;
    game.trick_number = 0;

    game.dealer_index = (round_no as usize - 1) % n;
    game.bidding_start_index = (game.dealer_index + 1) % n;
    let returning_leader = game
        .last_trick_winner
        .as_deref()
        .and_then(|w| game.seat_of(w));
    game.first_lead_index = returning_leader.unwrap_or(game.bidding_start_index);
    game.current_player_index = game.bidding_start_index;

    let default_choice = if nil_offered(round_no) {
        game.phase = Phase::NilPrompt;
        NilChoice::Undecided
    } else {
        game.phase = Phase::Bidding;
        NilChoice::SeeCards
    };
    game.nil_bids = game
        .player_order
        .iter()
        .map(|p| (p.clone(), default_choice))
        .collect();

    game.debug_assert_conservation();
    Ok(())
}

/// Score the finished round for every unit, append history rows, and move to
/// RoundEnd (or GameOver with a winner after round 11). For rounds below 11
/// the round counter advances here; the host's next-round trigger re-enters
/// `start_round`.
pub fn resolve_round(game: &mut Game) -> Result<RoundSummary, DomainError> {
    if game.phase != Phase::Playing
        || game.trick_number < game.current_round
        || !game.current_trick.is_empty()
    {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Round is not finished",
        ));
    }

    let round_no = game.current_round;
    let team_mode = !game.teams.is_empty();
    let mut round_scores = HashMap::new();
    let mut penalties = Vec::new();

    // Individual rows. In team mode these are display-only; the team pass
    // below drives the totals that decide the game.
    for name in game.player_order.clone() {
        let tricks = game.tricks_won.get(&name).copied().unwrap_or(0);
        let bid = game.bids.get(&name).copied().unwrap_or(0);
        let is_nil = game.nil_bids.get(&name) == Some(&NilChoice::Nil);

        let (delta, overtricks, nil_row) = if is_nil {
            (score_nil(tricks), 0, Some(tricks == 0))
        } else {
            let unit = score_non_nil(bid, tricks);
            (unit.delta, unit.overtricks, None)
        };

        *game.overtrick_bag.entry(name.clone()).or_insert(0) += overtricks;

        let prev_total = game.scores.get(&name).copied().unwrap_or(0);
        let (total_after, penalty_applied) = if team_mode {
            (prev_total + delta, false)
        } else {
            settle_total(prev_total, delta)
        };
        game.scores.insert(name.clone(), total_after);

        game.round_history
            .entry(name.clone())
            .or_default()
            .push(RoundRecord {
                round: round_no,
                bid,
                tricks_won: tricks,
                nil: nil_row,
                round_score: delta,
                penalty_applied,
                total_after,
            });

        if !team_mode {
            round_scores.insert(name.clone(), delta);
            if penalty_applied {
                penalties.push(name);
            }
        }
    }

    // Team pass: non-nil bids and tricks pool into one unit; each nil member
    // settles individually into the team total.
    if team_mode {
        for team in game.teams.clone() {
            let mut team_bid = 0u8;
            let mut team_tricks = 0u8;
            let mut nil_total = 0i32;
            for member in team
                .members
                .iter()
                .filter(|m| game.player_order.contains(*m))
            {
                let tricks = game.tricks_won.get(member).copied().unwrap_or(0);
                if game.nil_bids.get(member) == Some(&NilChoice::Nil) {
                    nil_total += score_nil(tricks);
                } else {
                    team_bid += game.bids.get(member).copied().unwrap_or(0);
                    team_tricks += tricks;
                }
            }

            let unit = score_non_nil(team_bid, team_tricks);
            let delta = unit.delta + nil_total;
            *game
                .team_overtrick_bag
                .entry(team.name.clone())
                .or_insert(0) += unit.overtricks;

            let prev_total = game.team_scores.get(&team.name).copied().unwrap_or(0);
            let (total_after, penalty_applied) = settle_total(prev_total, delta);
            game.team_scores.insert(team.name.clone(), total_after);

            game.team_round_history
                .entry(team.name.clone())
                .or_default()
                .push(RoundRecord {
                    round: round_no,
                    bid: team_bid,
                    tricks_won: team_tricks,
                    nil: None,
                    round_score: delta,
                    penalty_applied,
                    total_after,
                });

            round_scores.insert(team.name.clone(), delta);
            if penalty_applied {
                penalties.push(team.name);
            }
        }
    }

    if round_no >= MAX_ROUNDS {
        game.phase = Phase::GameOver;
        game.game_over = true;
        game.winner = compute_winner(game);
    } else {
        game.phase = Phase::RoundEnd;
        game.current_round += 1;
    }

    Ok(RoundSummary {
        round: round_no,
        round_scores,
        penalties,
        game_over: game.game_over,
    })
}

/// Highest total wins; ties go to the first unit in seating order
/// (Individual) or team-list order (Teams).
pub fn compute_winner(game: &Game) -> Option<Winner> {
    if game.teams.is_empty() {
        let mut best: Option<(&String, i32)> = None;
        for name in &game.player_order {
            let score = game.scores.get(name).copied().unwrap_or(0);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((name, score));
            }
        }
        best.map(|(name, score)| Winner {
            name: name.clone(),
            score,
            kind: WinnerKind::Individual,
        })
    } else {
        let mut best: Option<(&String, i32)> = None;
        for team in &game.teams {
            let score = game.team_scores.get(&team.name).copied().unwrap_or(0);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((&team.name, score));
            }
        }
        best.map(|(name, score)| Winner {
            name: name.clone(),
            score,
            kind: WinnerKind::Team,
        })
    }
}
