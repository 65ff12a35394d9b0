//! Handlers for the `/da4revit/v1/revit` resource: submit, poll and
//! cancel FBX export workitems.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use fbx_export_core::error::CoreError;
use fbx_export_core::export::ExportParams;
use fbx_export_core::storage::StorageObject;
use fbx_export_core::workitem::{NotificationStatus, WorkitemStatus};
use fbx_export_events::WorkitemNotification;
use fbx_export_forge::ForgeApiError;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::UserToken;
use crate::state::AppState;
use crate::tracker::TrackedWorkitem;

/// Body returned after a successful submission.
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    #[serde(rename = "workItemId")]
    pub work_item_id: String,
    #[serde(rename = "workItemStatus")]
    pub work_item_status: WorkitemStatus,
    #[serde(rename = "ExtraInfo")]
    pub extra_info: Option<String>,
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /api/forge/da4revit/v1/revit/{version_storage}/fbx
///
/// Start exporting FBX files from the given Revit version. The output zip
/// is written to a signed OSS URL that is handed back to the browser when
/// the workitem completes.
pub async fn export_fbx(
    user: UserToken,
    State(state): State<AppState>,
    Path(version_storage): Path<String>,
    AppJson(params): AppJson<ExportParams>,
) -> AppResult<impl IntoResponse> {
    let input = StorageObject::parse(&version_storage)?;
    let params = params.normalized()?;

    let output_url = state
        .forge
        .prepare_output_url()
        .await
        .map_err(|e| export_aborted(&state, e))?;

    let info = match state
        .forge
        .submit_export(&input, &params, &output_url, &user.token)
        .await
    {
        Ok(info) => info,
        Err(e) if e.is_rejection() => {
            tracing::error!(error = %e, urn = %input.urn(), "Workitem was rejected");
            return Err(AppError::ExportFailed);
        }
        Err(e) => return Err(export_aborted(&state, e)),
    };

    tracing::info!(
        workitem_id = %info.id,
        status = %info.status,
        export_all = params.export_all,
        views = params.view_ids.len(),
        "Submitted the workitem",
    );

    state
        .tracker
        .track(TrackedWorkitem::new(&info.id, user.token, output_url))
        .await;

    Ok(Json(ExportResponse {
        work_item_id: info.id,
        work_item_status: info.status,
        extra_info: None,
    }))
}

/// Tell every browser the export failed, and turn `err` into a response.
fn export_aborted(state: &AppState, err: ForgeApiError) -> AppError {
    tracing::error!(error = %err, "Exception while exporting to FBXs");
    state
        .event_bus
        .publish(WorkitemNotification::failed_without_id());
    AppError::Forge(err)
}

// ---------------------------------------------------------------------------
// Poll
// ---------------------------------------------------------------------------

/// GET /api/forge/da4revit/v1/revit/{workitem_id}
///
/// Return the workitem status document exactly as Design Automation
/// reports it.
pub async fn get_workitem_status(
    State(state): State<AppState>,
    Path(workitem_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let body = state.forge.workitem_status(&workitem_id).await?;
    Ok(Json(body))
}

// ---------------------------------------------------------------------------
// Cancel
// ---------------------------------------------------------------------------

/// DELETE /api/forge/da4revit/v1/revit/{workitem_id}
///
/// Cancel a workitem. This may have no effect if processing has already
/// started. Returns 204 when the workitem was being tracked, 404 otherwise.
pub async fn cancel_workitem(
    State(state): State<AppState>,
    Path(workitem_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.forge.cancel_workitem(&workitem_id).await?;

    if state.tracker.remove(&workitem_id).await.is_none() {
        tracing::warn!(workitem_id = %workitem_id, "The workitem is not in the list");
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Workitem",
            id: workitem_id,
        }));
    }

    tracing::info!(workitem_id = %workitem_id, "The workitem is cancelled");
    state.event_bus.publish(WorkitemNotification::new(
        workitem_id,
        NotificationStatus::Cancelled,
    ));

    Ok(StatusCode::NO_CONTENT)
}
