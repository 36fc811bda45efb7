//! Membership errors, surfaced to clients through request acks.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RoomError {
    #[error("Room not found")]
    RoomNotFound,
    #[error("That name is already taken")]
    NameTaken,
    #[error("Room is full")]
    RoomFull,
    #[error("Game already started")]
    GameAlreadyStarted,
    #[error("Invalid player name: {0}")]
    InvalidName(String),
    #[error("No such team: {0}")]
    TeamNotFound(String),
    #[error("Need at least 2 players")]
    NotEnoughPlayers,
    #[error("All players must be ready")]
    NotAllReady,
    #[error("Team play needs an even number of players")]
    UnevenPlayers,
    #[error("{0} is not assigned to a team")]
    PlayerUnassigned(String),
    #[error("Team {0} has no members")]
    EmptyTeam(String),
}
