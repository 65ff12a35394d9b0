//! 3D view listing for the export view selector.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use fbx_export_core::error::CoreError;
use fbx_export_core::viewables::list_3d_viewables;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::UserToken;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ViewablesQuery {
    /// Viewable id currently loaded in the viewer.
    pub current: Option<String>,
}

/// GET /api/forge/modelderivative/{urn}/views3d
///
/// List the 3D views of a translated model that can be exported.
pub async fn list_views_3d(
    user: UserToken,
    State(state): State<AppState>,
    Path(urn): Path<String>,
    Query(query): Query<ViewablesQuery>,
) -> AppResult<impl IntoResponse> {
    let manifest = state.forge.manifest(&urn, &user.token).await?;
    let rows = list_3d_viewables(&manifest, query.current.as_deref());

    if rows.is_empty() {
        tracing::warn!(urn = %urn, "Document contains no 3D viewables");
        return Err(AppError::Core(CoreError::NotFound {
            entity: "3D viewables for model",
            id: urn,
        }));
    }

    Ok(Json(DataResponse { data: rows }))
}
