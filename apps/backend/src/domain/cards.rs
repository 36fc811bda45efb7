//! Core card types and trick-comparison logic for a double-deck game.

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Numeric strength, 2 for Two up to 14 for Ace.
    pub fn value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }
}

/// One physical card. With two decks in play, `(suit, rank)` occurs twice;
/// `id` (0..=103) is the unique handle within a deal and `deck_num`
/// distinguishes the duplicates.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: u8,
    pub suit: Suit,
    pub rank: Rank,
    pub deck_num: u8,
}

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Display order: Spades, Hearts, Diamonds, Clubs; descending rank within a
/// suit. Not used for any game-logic comparison.
pub fn sort_hand(hand: &mut [Card]) {
    fn suit_order(suit: Suit) -> u8 {
        match suit {
            Suit::Spades => 0,
            Suit::Hearts => 1,
            Suit::Diamonds => 2,
            Suit::Clubs => 3,
        }
    }
    hand.sort_by(|a, b| {
        suit_order(a.suit)
            .cmp(&suit_order(b.suit))
            .then(b.rank.value().cmp(&a.rank.value()))
    });
}

/// Does `challenger` take the trick from `incumbent`, given the led suit?
///
/// Spades always trump. Within a comparable pair, higher rank wins; the
/// cross-deck duplicate (same suit and rank) resolves for the challenger,
/// which trick resolution plays later by construction.
pub fn outranks(challenger: Card, incumbent: Card, led: Suit) -> bool {
    let challenger_trump = challenger.suit == Suit::Spades;
    let incumbent_trump = incumbent.suit == Suit::Spades;
    if challenger_trump != incumbent_trump {
        return challenger_trump;
    }
    if challenger_trump {
        return challenger.rank.value() >= incumbent.rank.value();
    }

    let challenger_follows = challenger.suit == led;
    let incumbent_follows = incumbent.suit == led;
    if challenger_follows != incumbent_follows {
        return challenger_follows;
    }
    if challenger_follows {
        return challenger.rank.value() >= incumbent.rank.value();
    }
    false
}
