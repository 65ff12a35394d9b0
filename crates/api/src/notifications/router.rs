//! Forwards workitem notifications from the event bus to every browser.

use std::sync::Arc;

use axum::extract::ws::Message;
use fbx_export_events::{WorkitemNotification, SOCKET_TOPIC_WORKITEM};
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Consumes the event bus and broadcasts each notification as a
/// `{"topic": ..., "data": ...}` text frame.
pub struct NotificationRouter {
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run until the [`EventBus`](fbx_export_events::EventBus) is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<WorkitemNotification>) {
        loop {
            match receiver.recv().await {
                Ok(notification) => self.deliver(&notification).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    async fn deliver(&self, notification: &WorkitemNotification) {
        let frame = encode_frame(notification);
        let delivered = self.ws_manager.broadcast(Message::Text(frame.into())).await;
        tracing::debug!(
            workitem_id = ?notification.workitem_id,
            status = %notification.status,
            delivered,
            "Workitem notification delivered"
        );
    }
}

/// Text frame for a notification on the workitem topic.
pub fn encode_frame(notification: &WorkitemNotification) -> String {
    serde_json::json!({
        "topic": SOCKET_TOPIC_WORKITEM,
        "data": notification.to_payload(),
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use fbx_export_core::workitem::NotificationStatus;
    use fbx_export_events::EventBus;

    use super::*;

    #[test]
    fn frame_wraps_payload_in_topic() {
        let frame = encode_frame(&WorkitemNotification::new("wi-1", NotificationStatus::Cancelled));
        let json: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(json["topic"], "Workitem-Notification");
        assert_eq!(json["data"]["WorkitemId"], "wi-1");
        assert_eq!(json["data"]["Status"], "Cancelled");
    }

    #[tokio::test]
    async fn forwards_bus_notifications_to_sockets() {
        let ws_manager = Arc::new(WsManager::new());
        let mut rx = ws_manager.add("conn-1".to_string()).await;

        let bus = EventBus::default();
        let handle = tokio::spawn(NotificationRouter::new(Arc::clone(&ws_manager)).run(bus.subscribe()));

        bus.publish(WorkitemNotification::new("wi-9", NotificationStatus::Completed));

        let msg = tokio::time::timeout(std::time::Duration::from_secs(2), rx.recv())
            .await
            .expect("notification should arrive")
            .expect("channel open");
        let Message::Text(text) = msg else {
            panic!("expected a text frame");
        };
        assert!(text.as_str().contains("\"WorkitemId\":\"wi-9\""));

        drop(bus);
        handle.await.unwrap();
    }
}
