use crate::domain::test_gens::{assert_conservation, card, playing_game, seat_names};
use crate::domain::tricks::{legal_plays, play_card, resolve_trick, PlayOutcome};
use crate::domain::{Rank, Suit};
use crate::errors::domain::ValidationKind;

#[test]
fn leading_spades_is_always_legal() {
    let names = seat_names(2);
    let mut game = playing_game(
        &names,
        1,
        vec![
            ("A", vec![card(0, Suit::Spades, Rank::Ace)]),
            ("B", vec![card(1, Suit::Hearts, Rank::Two)]),
        ],
    );
    game.current_player_index = 0;

    assert!(!game.spades_broken);
    let outcome = play_card(&mut game, "A", 0).unwrap();
    assert_eq!(outcome, PlayOutcome::TurnAdvanced);
    assert!(game.spades_broken);
    assert_eq!(game.led_suit, Some(Suit::Spades));
}

#[test]
fn follow_suit_is_enforced() {
    let names = seat_names(2);
    let mut game = playing_game(
        &names,
        2,
        vec![
            (
                "A",
                vec![
                    card(0, Suit::Hearts, Rank::Five),
                    card(1, Suit::Hearts, Rank::Nine),
                ],
            ),
            (
                "B",
                vec![
                    card(2, Suit::Hearts, Rank::King),
                    card(3, Suit::Clubs, Rank::Ace),
                ],
            ),
        ],
    );
    game.current_player_index = 0;
    play_card(&mut game, "A", 0).unwrap();

    // B holds a heart, so the club is illegal; state must be untouched.
    let err = play_card(&mut game, "B", 3).unwrap_err();
    assert_eq!(err.kind, ValidationKind::MustFollowSuit);
    assert_eq!(game.hands["B"].len(), 2);
    assert_eq!(game.current_trick.len(), 1);

    play_card(&mut game, "B", 2).unwrap();
    assert_eq!(game.current_trick.len(), 2);
}

#[test]
fn offsuit_is_free_when_void() {
    let names = seat_names(2);
    let mut game = playing_game(
        &names,
        1,
        vec![
            ("A", vec![card(0, Suit::Hearts, Rank::Five)]),
            ("B", vec![card(1, Suit::Clubs, Rank::Two)]),
        ],
    );
    game.current_player_index = 0;
    play_card(&mut game, "A", 0).unwrap();
    let outcome = play_card(&mut game, "B", 1).unwrap();
    assert_eq!(outcome, PlayOutcome::TrickFull);
}

#[test]
fn spade_takes_the_trick_from_the_led_suit() {
    let names = seat_names(3);
    let mut game = playing_game(
        &names,
        1,
        vec![
            ("A", vec![card(0, Suit::Spades, Rank::Two)]),
            ("B", vec![card(1, Suit::Hearts, Rank::Five)]),
            ("C", vec![card(2, Suit::Hearts, Rank::King)]),
        ],
    );
    // Round 1: B leads.
    assert_eq!(game.current_player(), Some("B"));
    play_card(&mut game, "B", 1).unwrap();
    play_card(&mut game, "C", 2).unwrap();
    let outcome = play_card(&mut game, "A", 0).unwrap();
    assert_eq!(outcome, PlayOutcome::TrickFull);

    let result = resolve_trick(&mut game).unwrap();
    assert_eq!(result.winner, "A");
    assert_eq!(result.winning_card.id, 0);
    assert!(result.round_complete);
    assert_eq!(game.tricks_won["A"], 1);
    assert_eq!(game.tricks_won["B"], 0);
    assert_eq!(game.last_trick_winner.as_deref(), Some("A"));
    assert!(game.current_trick.is_empty());
    assert_eq!(game.led_suit, None);
}

#[test]
fn cross_deck_duplicate_goes_to_the_later_play() {
    let names = seat_names(2);
    let twin_a = card(4, Suit::Hearts, Rank::King);
    let mut twin_b = card(56, Suit::Hearts, Rank::King);
    twin_b.deck_num = 1;

    let mut game = playing_game(
        &names,
        1,
        vec![("A", vec![twin_a]), ("B", vec![twin_b])],
    );
    game.current_player_index = 0;
    play_card(&mut game, "A", 4).unwrap();
    play_card(&mut game, "B", 56).unwrap();

    let result = resolve_trick(&mut game).unwrap();
    assert_eq!(result.winner, "B");
    assert_eq!(result.winning_card.id, 56);
}

#[test]
fn trick_winner_leads_the_next_trick() {
    let names = seat_names(2);
    let mut game = playing_game(
        &names,
        2,
        vec![
            (
                "A",
                vec![
                    card(0, Suit::Hearts, Rank::Ace),
                    card(1, Suit::Clubs, Rank::Two),
                ],
            ),
            (
                "B",
                vec![
                    card(2, Suit::Hearts, Rank::Three),
                    card(3, Suit::Diamonds, Rank::Nine),
                ],
            ),
        ],
    );
    game.current_player_index = 1;
    play_card(&mut game, "B", 2).unwrap();
    play_card(&mut game, "A", 0).unwrap();

    let result = resolve_trick(&mut game).unwrap();
    assert_eq!(result.winner, "A");
    assert!(!result.round_complete);
    assert_eq!(game.current_player(), Some("A"));
    assert_eq!(game.trick_number, 1);
    assert_conservation(&game);
}

#[test]
fn wrong_phase_and_wrong_turn_plays_are_rejected() {
    let names = seat_names(2);
    let mut game = playing_game(
        &names,
        1,
        vec![
            ("A", vec![card(0, Suit::Hearts, Rank::Five)]),
            ("B", vec![card(1, Suit::Clubs, Rank::Two)]),
        ],
    );
    game.current_player_index = 0;

    let err = play_card(&mut game, "B", 1).unwrap_err();
    assert_eq!(err.kind, ValidationKind::OutOfTurn);

    let err = play_card(&mut game, "A", 9).unwrap_err();
    assert_eq!(err.kind, ValidationKind::CardNotInHand);

    game.phase = crate::domain::Phase::RoundEnd;
    let err = play_card(&mut game, "A", 0).unwrap_err();
    assert_eq!(err.kind, ValidationKind::PhaseMismatch);
}

#[test]
fn legal_plays_filters_to_the_led_suit() {
    let hand = vec![
        card(0, Suit::Hearts, Rank::Five),
        card(1, Suit::Hearts, Rank::Nine),
        card(2, Suit::Clubs, Rank::Ace),
    ];
    let legal = legal_plays(&hand, Some(Suit::Hearts));
    assert_eq!(legal.len(), 2);
    assert!(legal.iter().all(|c| c.suit == Suit::Hearts));

    let legal = legal_plays(&hand, Some(Suit::Diamonds));
    assert_eq!(legal.len(), 3);

    let legal = legal_plays(&hand, None);
    assert_eq!(legal.len(), 3);
}
