//! WebSocket infrastructure for pushing workitem notifications.
//!
//! Provides connection management, heartbeat pings, and the HTTP upgrade
//! handler used by the router.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
