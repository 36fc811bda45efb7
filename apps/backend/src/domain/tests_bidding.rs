use crate::domain::bidding::{nil_decision, place_bid};
use crate::domain::rounds::start_round;
use crate::domain::state::{Game, GameMode, NilChoice, Phase};
use crate::domain::test_gens::{bidding_game, seat_names};
use crate::errors::domain::ValidationKind;

use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

fn fresh_game(n: usize, round_no: u8) -> Game {
    let mut game = Game::new(seat_names(n), GameMode::Individual, Vec::new());
    game.current_round = round_no;
    start_round(&mut game, &mut ChaCha12Rng::seed_from_u64(31)).unwrap();
    game
}

#[test]
fn nil_prompt_opens_rounds_ten_and_eleven_only() {
    for round_no in 1..=11u8 {
        let game = fresh_game(3, round_no);
        let expected = if round_no >= 10 {
            Phase::NilPrompt
        } else {
            Phase::Bidding
        };
        assert_eq!(game.phase, expected, "round {round_no}");
    }
}

#[test]
fn nil_declaration_locks_the_bid_at_zero() {
    let mut game = fresh_game(3, 10);
    nil_decision(&mut game, "B", true).unwrap();
    assert_eq!(game.bids.get("B"), Some(&0));
    nil_decision(&mut game, "A", false).unwrap();
    nil_decision(&mut game, "C", false).unwrap();

    assert_eq!(game.phase, Phase::Bidding);
    // B answered nil and cannot bid again.
    game.current_player_index = game.seat_of("B").unwrap();
    let err = place_bid(&mut game, "B", 2).unwrap_err();
    assert_eq!(err.kind, ValidationKind::NilLocked);
}

#[test]
fn bidding_skips_nil_seats() {
    // Round 10 with 3 players: dealer lands back on A, so B opens.
    let mut game = fresh_game(3, 10);
    assert_eq!(game.dealer_index, 0);
    assert_eq!(game.bidding_start_index, 1);

    // B (the bidding opener) declares nil; bidding should open at C.
    nil_decision(&mut game, "B", true).unwrap();
    nil_decision(&mut game, "A", false).unwrap();
    nil_decision(&mut game, "C", false).unwrap();

    assert_eq!(game.phase, Phase::Bidding);
    assert_eq!(game.current_player(), Some("C"));

    place_bid(&mut game, "C", 3).unwrap();
    assert_eq!(game.current_player(), Some("A"));
    place_bid(&mut game, "A", 2).unwrap();

    // Everyone is decided; play opens at the first lead.
    assert_eq!(game.phase, Phase::Playing);
    assert_eq!(game.current_player_index, game.first_lead_index);
}

#[test]
fn everyone_nil_goes_straight_to_playing() {
    let mut game = fresh_game(2, 11);
    nil_decision(&mut game, "A", true).unwrap();
    nil_decision(&mut game, "B", true).unwrap();
    assert_eq!(game.phase, Phase::Playing);
}

#[test]
fn nil_answer_is_recorded_once() {
    let mut game = fresh_game(3, 10);
    nil_decision(&mut game, "A", false).unwrap();
    let err = nil_decision(&mut game, "A", true).unwrap_err();
    assert_eq!(err.kind, ValidationKind::AlreadyDecided);
    assert_eq!(game.nil_bids.get("A"), Some(&NilChoice::SeeCards));
}

#[test]
fn nil_decisions_are_rejected_outside_the_prompt() {
    let mut game = fresh_game(3, 4);
    let err = nil_decision(&mut game, "A", true).unwrap_err();
    assert_eq!(err.kind, ValidationKind::PhaseMismatch);
}

#[test]
fn bids_outside_the_round_range_are_rejected() {
    let names = seat_names(3);
    let mut game = bidding_game(&names, 4, Vec::new());
    let opener = game.current_player().unwrap().to_string();
    let err = place_bid(&mut game, &opener, 5).unwrap_err();
    assert_eq!(err.kind, ValidationKind::InvalidBid);
    assert!(game.bids.is_empty());

    place_bid(&mut game, &opener, 4).unwrap();
    assert_eq!(game.bids.get(opener.as_str()), Some(&4));
}

#[test]
fn out_of_turn_bids_are_rejected() {
    let names = seat_names(3);
    let mut game = bidding_game(&names, 2, Vec::new());
    assert_eq!(game.current_player(), Some("C"));
    let err = place_bid(&mut game, "A", 1).unwrap_err();
    assert_eq!(err.kind, ValidationKind::OutOfTurn);
}

#[test]
fn bid_sum_may_equal_the_round_number() {
    // No forbidden-sum rule in this variant: bids totalling the round count
    // are accepted.
    let names = seat_names(2);
    let mut game = bidding_game(&names, 3, Vec::new());
    let first = game.current_player().unwrap().to_string();
    place_bid(&mut game, &first, 1).unwrap();
    let second = game.current_player().unwrap().to_string();
    place_bid(&mut game, &second, 2).unwrap();
    assert_eq!(game.phase, Phase::Playing);
}

#[test]
fn bidding_order_starts_left_of_dealer() {
    // Round 1 with 3 players: dealer A, so B opens the bidding.
    let game = fresh_game(3, 1);
    assert_eq!(game.dealer_index, 0);
    assert_eq!(game.current_player(), Some("B"));
}
