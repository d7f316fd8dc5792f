use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hopelink_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (dashboard clients).
    pub ws_manager: Arc<WsManager>,
    /// Change-notification bus; every create and status write publishes here.
    pub event_bus: Arc<hopelink_events::EventBus>,
    /// Incrementally patched status map backing the live dashboard.
    pub status_cache: Arc<hopelink_events::StatusCache>,
}
