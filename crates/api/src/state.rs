use std::sync::Arc;

use fbx_export_events::EventBus;
use fbx_export_forge::ForgeService;

use crate::tracker::WorkitemTracker;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Forge/APS operations (real client in production, fakes in tests).
    pub forge: Arc<dyn ForgeService>,
    /// Workitems waiting for their completion callback.
    pub tracker: Arc<WorkitemTracker>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Bus carrying workitem notifications to the WebSocket router.
    pub event_bus: Arc<EventBus>,
}
