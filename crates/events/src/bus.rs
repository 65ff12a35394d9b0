//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] fans every [`WorkitemNotification`] out to all
//! subscribers. It is shared via `Arc<EventBus>` across the application.

use fbx_export_core::progress::ProgressStep;
use fbx_export_core::workitem::NotificationStatus;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topic name browsers listen on for workitem updates.
pub const SOCKET_TOPIC_WORKITEM: &str = "Workitem-Notification";

// ---------------------------------------------------------------------------
// WorkitemNotification
// ---------------------------------------------------------------------------

/// Status change of a single workitem.
///
/// `workitem_id` is absent when the export failed before the service
/// assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkitemNotification {
    pub workitem_id: Option<String>,
    pub status: NotificationStatus,
    pub extra_info: Option<String>,
}

impl WorkitemNotification {
    pub fn new(workitem_id: impl Into<String>, status: NotificationStatus) -> Self {
        Self {
            workitem_id: Some(workitem_id.into()),
            status,
            extra_info: None,
        }
    }

    /// A failure that cannot be tied to any workitem.
    pub fn failed_without_id() -> Self {
        Self {
            workitem_id: None,
            status: NotificationStatus::Failed,
            extra_info: None,
        }
    }

    /// Attach extra information, e.g. the download URL on completion.
    pub fn with_extra_info(mut self, extra_info: impl Into<String>) -> Self {
        self.extra_info = Some(extra_info.into());
        self
    }

    /// JSON body sent over the socket, with the progress step inlined.
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "WorkitemId": self.workitem_id,
            "Status": self.status,
            "ExtraInfo": self.extra_info,
            "Progress": ProgressStep::for_status(self.status),
        })
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
pub struct EventBus {
    sender: broadcast::Sender<WorkitemNotification>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unread notifications are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notification to all current subscribers.
    pub fn publish(&self, notification: WorkitemNotification) {
        tracing::debug!(
            workitem_id = ?notification.workitem_id,
            status = %notification.status,
            "Publishing workitem notification"
        );
        // A send error only means there are zero receivers.
        let _ = self.sender.send(notification);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WorkitemNotification> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
