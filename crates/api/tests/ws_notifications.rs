//! End-to-end test: a browser connected over WebSocket receives the
//! notification produced by a Design Automation callback.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{TestApp, SIGNED_URL, USER_TOKEN};
use fbx_export_api::handlers::callback::complete_workitem;
use fbx_export_api::notifications::NotificationRouter;
use fbx_export_api::tracker::TrackedWorkitem;
use fbx_export_core::workitem::{WorkitemInfo, WorkitemStatus};
use futures::StreamExt;
use tokio_tungstenite::tungstenite::Message;

#[tokio::test]
async fn callback_notification_reaches_websocket_client() {
    let app = TestApp::default();
    tokio::spawn(
        NotificationRouter::new(Arc::clone(&app.state.ws_manager))
            .run(app.state.event_bus.subscribe()),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let (mut socket, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/api/forge/ws"))
        .await
        .expect("WebSocket handshake");

    // Registration happens after the upgrade completes on the server side.
    for _ in 0..50 {
        if app.state.ws_manager.connection_count().await == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(app.state.ws_manager.connection_count().await, 1);

    app.state
        .tracker
        .track(TrackedWorkitem::new("wi-9", USER_TOKEN, SIGNED_URL))
        .await;
    complete_workitem(
        app.state.clone(),
        WorkitemInfo {
            id: "wi-9".into(),
            status: WorkitemStatus::Success,
            report_url: None,
        },
    )
    .await;

    let frame = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            match socket.next().await {
                Some(Ok(Message::Text(text))) => break text,
                Some(Ok(_)) => continue,
                other => panic!("unexpected WebSocket event: {other:?}"),
            }
        }
    })
    .await
    .expect("timed out waiting for frame");

    let json: serde_json::Value = serde_json::from_str(frame.as_str()).unwrap();
    assert_eq!(json["topic"], "Workitem-Notification");
    assert_eq!(json["data"]["WorkitemId"], "wi-9");
    assert_eq!(json["data"]["Status"], "Completed");
    assert_eq!(json["data"]["ExtraInfo"], SIGNED_URL);
    assert_eq!(json["data"]["Progress"]["percent"], 100);
}
