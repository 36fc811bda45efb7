//! Server configuration from the environment. There is deliberately little
//! of it: a port, and an environment name that drives the CORS posture.

use std::env;

pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// True when `APP_ENV=production`; browsers then get no CORS allowance.
    pub production: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let production = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);
        Self { port, production }
    }
}
