//! Backend test support utilities
//!
//! This crate provides unified logging initialization for unit and
//! integration tests.

pub mod logging;
