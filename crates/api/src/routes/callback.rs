//! Webhooks called by Forge services.

use axum::routing::post;
use axum::Router;

use crate::handlers::callback;
use crate::state::AppState;

/// Routes mounted at `/callback`.
///
/// ```text
/// POST   /designautomation        -> design_automation_callback
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/designautomation",
        post(callback::design_automation_callback),
    )
}
