#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented
    )
)]

pub mod config;
pub mod domain;
pub mod errors;
pub mod health;
pub mod middleware;
pub mod rooms;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod ws;

// Re-exports for public API
pub use errors::domain::{DomainError, ValidationKind};
pub use rooms::{RoomError, RoomManager};
pub use services::game_flow::GameFlowService;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
