//! WebSocket change feed.
//!
//! Provides connection management, heartbeat monitoring, the per-connection
//! feed pump and the HTTP upgrade handler used by Axum routes.

mod feed;
mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
