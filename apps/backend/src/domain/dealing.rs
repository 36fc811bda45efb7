//! Double-deck construction, shuffling and dealing.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::cards::{Card, Rank, Suit};
use crate::domain::rules::DECK_SIZE;
use crate::errors::domain::{DomainError, ValidationKind};

const SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];
const RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

/// Two full decks, ids 0..=103, deck 0 followed by deck 1.
pub fn double_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for deck_num in 0..2u8 {
        for suit in SUITS {
            for rank in RANKS {
                deck.push(Card {
                    id: deck.len() as u8,
                    suit,
                    rank,
                    deck_num,
                });
            }
        }
    }
    deck
}

/// Fisher-Yates shuffle. Production callers pass `rand::rng()`; tests inject
/// a seeded `ChaCha12Rng` for reproducibility.
pub fn shuffle<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    deck.shuffle(rng);
}

/// Shuffle a fresh double deck and deal `cards_each` consecutive cards to
/// every player, in seating order.
pub fn deal<R: Rng + ?Sized>(
    player_order: &[String],
    cards_each: u8,
    rng: &mut R,
) -> Result<HashMap<String, Vec<Card>>, DomainError> {
    let needed = player_order.len() * cards_each as usize;
    if needed > DECK_SIZE {
        return Err(DomainError::validation(
            ValidationKind::DeckExhausted,
            format!("Cannot deal {needed} cards from a {DECK_SIZE}-card double deck"),
        ));
    }

    let mut deck = double_deck();
    shuffle(&mut deck, rng);

    let mut hands = HashMap::with_capacity(player_order.len());
    for (seat, name) in player_order.iter().enumerate() {
        let start = seat * cards_each as usize;
        let hand = deck[start..start + cards_each as usize].to_vec();
        hands.insert(name.clone(), hand);
    }
    Ok(hands)
}
