use axum::routing::get;
use axum::Router;

use crate::handlers::viewables;
use crate::state::AppState;

/// Routes mounted at `/modelderivative`.
///
/// ```text
/// GET    /{urn}/views3d           -> list_views_3d
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{urn}/views3d", get(viewables::list_views_3d))
}
