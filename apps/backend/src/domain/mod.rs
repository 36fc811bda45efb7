//! Domain layer: pure game logic, no transport or room concerns.

pub mod bidding;
pub mod cards;
pub mod dealing;
pub mod rounds;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod tricks;

#[cfg(test)]
pub mod test_gens;
#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_integration;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use cards::{hand_has_suit, outranks, sort_hand, Card, Rank, Suit};
pub use rules::{
    cards_per_player, nil_offered, valid_bid_range, DECK_SIZE, MAX_PLAYERS, MAX_ROUNDS,
    MIN_PLAYERS, NIL_ROUND_THRESHOLD,
};
pub use snapshot::GameStateView;
pub use state::{
    Game, GameMode, NilChoice, Phase, RoundRecord, Team, TrickPlay, Winner, WinnerKind,
};
