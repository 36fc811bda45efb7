//! Nil prompt and bidding transitions.

use crate::domain::rules::valid_bid_range;
use crate::domain::state::{Game, NilChoice, Phase};
use crate::errors::domain::{DomainError, ValidationKind};

/// Record a player's answer to the pre-deal nil prompt. Declaring nil fixes
/// the bid at zero. Once every player has decided, bidding opens (or play
/// begins immediately if everyone went nil).
pub fn nil_decision(game: &mut Game, player: &str, go_nil: bool) -> Result<(), DomainError> {
    if game.phase != Phase::NilPrompt {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Not in the nil prompt phase",
        ));
    }
    let choice = game.nil_bids.get_mut(player).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::UnknownPlayer,
            format!("{player} is not in this game"),
        )
    })?;
    if *choice != NilChoice::Undecided {
        return Err(DomainError::validation(
            ValidationKind::AlreadyDecided,
            format!("{player} already answered the nil prompt"),
        ));
    }

    *choice = if go_nil {
        NilChoice::Nil
    } else {
        NilChoice::SeeCards
    };
    if go_nil {
        game.bids.insert(player.to_string(), 0);
    }

    if game
        .nil_bids
        .values()
        .all(|c| *c != NilChoice::Undecided)
    {
        enter_bidding(game);
    }
    Ok(())
}

/// Accept a bid from the current player and advance the turn past players
/// whose bids are already fixed (nil declarers). When every seat has a bid,
/// play begins.
pub fn place_bid(game: &mut Game, player: &str, bid: u8) -> Result<(), DomainError> {
    if game.phase != Phase::Bidding {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Not in the bidding phase",
        ));
    }
    if game.current_player() != Some(player) {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("It is not {player}'s turn to bid"),
        ));
    }
    if game.nil_bids.get(player) == Some(&NilChoice::Nil) {
        return Err(DomainError::validation(
            ValidationKind::NilLocked,
            "A nil bid is fixed at zero",
        ));
    }
    let range = valid_bid_range(game.current_round);
    if !range.contains(&bid) {
        return Err(DomainError::validation(
            ValidationKind::InvalidBid,
            format!("Bid must be in range {range:?}"),
        ));
    }

    game.bids.insert(player.to_string(), bid);
    advance_past_decided(game);
    Ok(())
}

/// All nil answers are in: open bidding at the seat left of the dealer,
/// skipping seats whose bids are already fixed.
fn enter_bidding(game: &mut Game) {
    game.phase = Phase::Bidding;
    game.current_player_index = game.bidding_start_index;
    advance_past_decided(game);
}

/// Move the turn to the next seat without a bid; if none remains, transition
/// to Playing with the first lead seated.
fn advance_past_decided(game: &mut Game) {
    let n = game.seat_count();
    for _ in 0..n {
        let decided = game
            .current_player()
            .is_some_and(|p| game.bids.contains_key(p));
        if !decided {
            break;
        }
        game.advance_turn();
    }
    let all_bid = game
        .player_order
        .iter()
        .all(|p| game.bids.contains_key(p));
    if all_bid {
        enter_playing(game);
    }
}

fn enter_playing(game: &mut Game) {
    game.phase = Phase::Playing;
    game.current_trick.clear();
    game.led_suit = None;
    game.current_player_index = game.first_lead_index;
}
