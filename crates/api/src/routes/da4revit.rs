//! Route definitions for the Design Automation for Revit export resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::da4revit;
use crate::state::AppState;

/// Routes mounted at `/da4revit/v1/revit`.
///
/// ```text
/// POST   /{version_storage}/fbx   -> export_fbx
/// GET    /{workitem_id}           -> get_workitem_status
/// DELETE /{workitem_id}           -> cancel_workitem
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{version_storage}/fbx", post(da4revit::export_fbx))
        .route(
            "/{workitem_id}",
            get(da4revit::get_workitem_status).delete(da4revit::cancel_workitem),
        )
}
