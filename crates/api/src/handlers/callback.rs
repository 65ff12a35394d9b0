//! Design Automation `onComplete` webhook.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use fbx_export_core::workitem::{NotificationStatus, WorkitemInfo};
use fbx_export_events::WorkitemNotification;

use crate::state::AppState;

/// POST /api/forge/callback/designautomation
///
/// Always acknowledged with `202`; the body is parsed and the workitem
/// settled in the background. Bodies that are not a workitem summary are
/// logged and dropped.
pub async fn design_automation_callback(State(state): State<AppState>, body: Bytes) -> StatusCode {
    match serde_json::from_slice::<WorkitemInfo>(&body) {
        Ok(info) => {
            tokio::spawn(complete_workitem(state, info));
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                body = %String::from_utf8_lossy(&body),
                "Ignoring unreadable workitem callback",
            );
        }
    }
    StatusCode::ACCEPTED
}

/// Settle a finished workitem and notify the browsers.
///
/// The entry is dropped from the tracker in every outcome.
pub async fn complete_workitem(state: AppState, info: WorkitemInfo) {
    let workitem_id = info.id.clone();

    if !info.status.is_success() {
        let tracked = state.tracker.remove(&workitem_id).await.is_some();
        tracing::warn!(
            workitem_id = %workitem_id,
            status = %info.status,
            report_url = ?info.report_url,
            tracked,
            "Workitem did not succeed",
        );
        state.event_bus.publish(WorkitemNotification::new(
            workitem_id,
            NotificationStatus::Failed,
        ));
        return;
    }

    let Some(workitem) = state.tracker.remove(&workitem_id).await else {
        tracing::warn!(
            workitem_id = %workitem_id,
            "The workitem to callback is not in the item list",
        );
        return;
    };

    let notification = match &workitem.create_version {
        Some(create_version) => {
            state.event_bus.publish(WorkitemNotification::new(
                &workitem_id,
                NotificationStatus::Success,
            ));
            tracing::info!(workitem_id = %workitem_id, "Creating new version from the workitem");

            match state
                .forge
                .create_version(
                    &create_version.project_id,
                    &create_version.payload,
                    &workitem.access_token,
                )
                .await
            {
                Ok(()) => {
                    tracing::info!(workitem_id = %workitem_id, "Created a new version of the file");
                    WorkitemNotification::new(&workitem_id, NotificationStatus::Completed)
                }
                Err(e) => {
                    tracing::error!(
                        workitem_id = %workitem_id,
                        error = %e,
                        "Failed to create a new version of the file",
                    );
                    WorkitemNotification::new(&workitem_id, NotificationStatus::Failed)
                }
            }
        }
        None => WorkitemNotification::new(&workitem_id, NotificationStatus::Completed)
            .with_extra_info(&workitem.output_url),
    };

    state.event_bus.publish(notification);
}
