//! Domain-level error type used across the game engine and orchestrator.
//!
//! This error type is transport-agnostic. The orchestrator decides per kind
//! whether a failure is surfaced to the caller (`invalid-play`) or dropped as
//! a stale event.

use thiserror::Error;

/// What a rejected game action violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Event arrived in a phase that does not accept it.
    PhaseMismatch,
    /// Actor is not the current player.
    OutOfTurn,
    /// Actor is not part of this game.
    UnknownPlayer,
    /// A nil decision was already recorded for this player.
    AlreadyDecided,
    /// A nil bidder's bid is fixed at zero.
    NilLocked,
    /// Bid outside `0..=current_round`.
    InvalidBid,
    /// The referenced card is not in the actor's hand.
    CardNotInHand,
    /// A card of the led suit was held but not played.
    MustFollowSuit,
    /// The deal would require more cards than two decks hold.
    DeckExhausted,
}

/// Central domain error: a validation kind plus a human-readable detail.
///
/// `Display` renders only the detail; that string is what reaches a client
/// in an `invalid-play` message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct DomainError {
    pub kind: ValidationKind,
    pub detail: String,
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}
