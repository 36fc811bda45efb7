//! Trick play: legality, card placement and trick resolution.

use crate::domain::cards::{hand_has_suit, outranks, Card, Suit};
use crate::domain::state::{Game, Phase, TrickPlay};
use crate::errors::domain::{DomainError, ValidationKind};

/// What `play_card` left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Every seat has played; the caller schedules resolution.
    TrickFull,
    /// The turn moved to the next seat.
    TurnAdvanced,
}

/// A resolved trick.
#[derive(Debug, Clone, PartialEq)]
pub struct TrickResult {
    pub winner: String,
    pub winning_card: Card,
    pub plays: Vec<TrickPlay>,
    /// True when this was the round's final trick.
    pub round_complete: bool,
}

/// Cards from `hand` that may legally be played against an optional led suit:
/// the led suit if any is held, otherwise the whole hand. Leading is
/// unrestricted (spades may be led at any time in this variant).
pub fn legal_plays(hand: &[Card], led: Option<Suit>) -> Vec<Card> {
    match led {
        Some(suit) if hand_has_suit(hand, suit) => {
            hand.iter().filter(|c| c.suit == suit).copied().collect()
        }
        _ => hand.to_vec(),
    }
}

/// Move a card from the current player's hand into the trick.
pub fn play_card(game: &mut Game, player: &str, card_id: u8) -> Result<PlayOutcome, DomainError> {
    if game.phase != Phase::Playing {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Not in the playing phase",
        ));
    }
    if game.current_player() != Some(player) {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("It is not {player}'s turn"),
        ));
    }
    let hand = game.hands.get_mut(player).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::UnknownPlayer,
            format!("{player} has no hand in this game"),
        )
    })?;
    let pos = hand.iter().position(|c| c.id == card_id).ok_or_else(|| {
        DomainError::validation(ValidationKind::CardNotInHand, "That card is not in your hand")
    })?;
    let card = hand[pos];

    if let Some(led) = game.led_suit {
        if card.suit != led && hand_has_suit(hand, led) {
            return Err(DomainError::validation(
                ValidationKind::MustFollowSuit,
                format!("You must follow {led:?}"),
            ));
        }
    }

    hand.remove(pos);
    if game.current_trick.is_empty() {
        game.led_suit = Some(card.suit);
    }
    if card.suit == Suit::Spades {
        game.spades_broken = true;
    }
    game.current_trick.push(TrickPlay {
        player: player.to_string(),
        card,
    });

    let outcome = if game.current_trick.len() >= game.seat_count() {
        PlayOutcome::TrickFull
    } else {
        game.advance_turn();
        PlayOutcome::TurnAdvanced
    };
    game.debug_assert_conservation();
    Ok(outcome)
}

/// Fold the full trick into a winner, credit them, and clear the trick so the
/// snapshot is consistent at every lock boundary. The winner leads the next
/// trick; when the round's tricks are exhausted the caller moves on to round
/// resolution.
pub fn resolve_trick(game: &mut Game) -> Result<TrickResult, DomainError> {
    if game.phase != Phase::Playing || game.current_trick.len() < game.seat_count() {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "No full trick to resolve",
        ));
    }
    let Some(first) = game.current_trick.first() else {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "No full trick to resolve",
        ));
    };
    let led = game.led_suit.unwrap_or(first.card.suit);

    let mut winning = first.clone();
    for play in &game.current_trick[1..] {
        // The challenger is the later play, so ties go to it.
        if outranks(play.card, winning.card, led) {
            winning = play.clone();
        }
    }

    *game.tricks_won.entry(winning.player.clone()).or_insert(0) += 1;
    game.last_trick_winner = Some(winning.player.clone());
    game.trick_number += 1;

    let plays = std::mem::take(&mut game.current_trick);
    game.led_suit = None;

    let round_complete = game.trick_number >= game.current_round;
    if !round_complete {
        if let Some(seat) = game.seat_of(&winning.player) {
            game.current_player_index = seat;
        }
    }
    game.debug_assert_conservation();

    Ok(TrickResult {
        winner: winning.player,
        winning_card: winning.card,
        plays,
        round_complete,
    })
}
