//! Room and membership model: join codes, players, teams, lobby
//! configuration and the process-wide rooms table.

pub mod error;
pub mod manager;
pub mod room;

pub use error::RoomError;
pub use manager::{RoomHandle, RoomManager};
pub use room::{JoinOutcome, LeaveOutcome, Player, PlayerView, RemovalOutcome, Room, RoomView};
