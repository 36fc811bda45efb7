//! Proptest generators and constructed-state helpers for domain tests.

use proptest::prelude::*;

use crate::domain::dealing::double_deck;
use crate::domain::state::{Game, GameMode, NilChoice, Phase};
use crate::domain::{Card, Rank, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Spades),
        Just(Suit::Hearts),
        Just(Suit::Diamonds),
        Just(Suit::Clubs),
    ]
}

/// 1 to `max` distinct physical cards drawn from the double deck.
pub fn unique_cards_up_to(max: usize) -> impl Strategy<Value = Vec<Card>> {
    proptest::sample::subsequence(double_deck(), 1..=max)
}

/// A hand of up to 11 distinct physical cards.
pub fn hand() -> impl Strategy<Value = Vec<Card>> {
    unique_cards_up_to(11)
}

/// Single-letter seat names A, B, C, ...
pub fn seat_names(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            char::from(b'A' + i as u8).to_string()
        })
        .collect()
}

pub fn card(id: u8, suit: Suit, rank: Rank) -> Card {
    Card {
        id,
        suit,
        rank,
        deck_num: 0,
    }
}

/// A game mid-way through `round_no` in the Playing phase, with hands pinned
/// by the caller. Indices follow the round formulas; the first lead opens.
pub fn playing_game(names: &[String], round_no: u8, hands: Vec<(&str, Vec<Card>)>) -> Game {
    let mut game = bidding_game(names, round_no, hands);
    for name in &game.player_order {
        game.bids.insert(name.clone(), 0);
    }
    game.phase = Phase::Playing;
    game.current_player_index = game.first_lead_index;
    game
}

/// A game at the top of `round_no` in the Bidding phase, with hands pinned by
/// the caller and no bids recorded yet.
pub fn bidding_game(names: &[String], round_no: u8, hands: Vec<(&str, Vec<Card>)>) -> Game {
    let n = names.len();
    let mut game = Game::new(names.to_vec(), GameMode::Individual, Vec::new());
    game.current_round = round_no;
    game.phase = Phase::Bidding;
    game.dealer_index = (round_no as usize - 1) % n;
    game.bidding_start_index = (game.dealer_index + 1) % n;
    game.first_lead_index = game.bidding_start_index;
    game.current_player_index = game.bidding_start_index;
    game.hands = hands
        .into_iter()
        .map(|(name, hand)| (name.to_string(), hand))
        .collect();
    game.nil_bids = names
        .iter()
        .map(|p| (p.clone(), NilChoice::SeeCards))
        .collect();
    game.tricks_won = names.iter().map(|p| (p.clone(), 0)).collect();
    game
}

/// Empty-handed game in the Playing phase with `trick_number` already at the
/// round count, ready for `resolve_round`. Bids and tricks are pinned.
pub fn settled_game(
    names: &[String],
    round_no: u8,
    bids: &[(&str, u8)],
    tricks: &[(&str, u8)],
) -> Game {
    let hands: Vec<(&str, Vec<Card>)> = Vec::new();
    let mut game = playing_game(names, round_no, hands);
    game.hands = names.iter().map(|p| (p.clone(), Vec::new())).collect();
    game.trick_number = round_no;
    game.bids = bids
        .iter()
        .map(|(name, bid)| (name.to_string(), *bid))
        .collect();
    game.tricks_won = tricks
        .iter()
        .map(|(name, won)| (name.to_string(), *won))
        .collect();
    game
}

/// Sum of cards held, in flight and already resolved, for conservation checks.
pub fn cards_accounted_for(game: &Game) -> usize {
    let held: usize = game
        .player_order
        .iter()
        .filter_map(|p| game.hands.get(p))
        .map(Vec::len)
        .sum();
    held + game.trick_number as usize * game.player_order.len() + game.current_trick.len()
}

pub fn assert_conservation(game: &Game) {
    assert_eq!(
        cards_accounted_for(game),
        game.current_round as usize * game.player_order.len(),
        "card conservation violated"
    );
}

