pub mod callback;
pub mod da4revit;
pub mod health;
pub mod viewables;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/forge` route tree.
///
/// ```text
/// /ws                                              WebSocket notifications
///
/// /da4revit/v1/revit/{version_storage}/fbx         submit export (POST)
/// /da4revit/v1/revit/{workitem_id}                 poll (GET), cancel (DELETE)
///
/// /callback/designautomation                       workitem webhook (POST)
///
/// /modelderivative/{urn}/views3d                   selectable 3D views (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/da4revit/v1/revit", da4revit::router())
        .nest("/callback", callback::router())
        .nest("/modelderivative", viewables::router())
}
