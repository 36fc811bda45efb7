//! Session registry: maps live connections to actix recipients so the
//! orchestrator can fan out per-player messages without touching actor
//! internals.

use std::sync::atomic::{AtomicUsize, Ordering};

use actix::prelude::*;
use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::ws::protocol::ServerMsg;

/// A server message addressed to one connection.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<Uuid, Recipient<Outbound>>,
    active_connections: AtomicUsize,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, session_id: Uuid, recipient: Recipient<Outbound>) {
        self.sessions.insert(session_id, recipient);
        let active = self.active_connections.fetch_add(1, Ordering::Relaxed) + 1;
        info!(session_id = %session_id, active_connections = active, "session registered");
    }

    pub fn unregister(&self, session_id: Uuid) {
        if self.sessions.remove(&session_id).is_some() {
            let active = self
                .active_connections
                .fetch_sub(1, Ordering::Relaxed)
                .saturating_sub(1);
            info!(session_id = %session_id, active_connections = active, "session unregistered");
        }
    }

    /// Enqueue a message for one connection. Messages to connections that
    /// are already gone are dropped silently; the membership layer tracks
    /// who is reachable.
    pub fn send(&self, session_id: Uuid, msg: ServerMsg) {
        match self.sessions.get(&session_id) {
            Some(recipient) => recipient.do_send(Outbound(msg)),
            None => debug!(session_id = %session_id, "dropping message for absent session"),
        }
    }

    pub fn active_connections_count(&self) -> usize {
        self.active_connections.load(Ordering::Relaxed)
    }
}
