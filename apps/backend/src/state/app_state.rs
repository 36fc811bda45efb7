use std::sync::Arc;

use crate::services::game_flow::GameFlowService;
use crate::ws::hub::SessionRegistry;

/// Application state containing shared resources. Rooms live only in process
/// memory; there is nothing to persist or reconnect to.
#[derive(Clone)]
pub struct AppState {
    /// Session registry for websocket fan-out.
    pub registry: Arc<SessionRegistry>,
    /// The orchestrator binding rooms, game engine and sessions together.
    pub flow: Arc<GameFlowService>,
}

impl AppState {
    pub fn new() -> Self {
        let registry = Arc::new(SessionRegistry::new());
        let flow = GameFlowService::new(registry.clone());
        Self { registry, flow }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
