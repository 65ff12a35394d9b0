#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use fbx_export_api::config::ServerConfig;
use fbx_export_api::router::build_app_router;
use fbx_export_api::state::AppState;
use fbx_export_api::tracker::WorkitemTracker;
use fbx_export_api::ws::WsManager;
use fbx_export_core::export::ExportParams;
use fbx_export_core::storage::StorageObject;
use fbx_export_core::workitem::{WorkitemInfo, WorkitemStatus};
use fbx_export_events::{EventBus, WorkitemNotification};
use fbx_export_forge::{ForgeApiError, ForgeService};
use http_body_util::BodyExt;
use tokio::sync::broadcast;
use tower::ServiceExt;

pub const USER_TOKEN: &str = "user-3legged-token";
pub const SIGNED_URL: &str = "https://signed.example/exportedFBXs.zip";

// ---------------------------------------------------------------------------
// Fake Forge
// ---------------------------------------------------------------------------

/// How a fake Forge call should behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    /// Forge answers with an error status.
    Rejected,
    /// The request never reaches Forge.
    Unreachable,
}

impl Outcome {
    fn check(self) -> Result<(), ForgeApiError> {
        match self {
            Outcome::Ok => Ok(()),
            Outcome::Rejected => Err(ForgeApiError::Api {
                status: 400,
                body: "bad request".into(),
            }),
            Outcome::Unreachable => Err(ForgeApiError::InvalidUrl("unreachable".into())),
        }
    }
}

/// Record of a submitted export.
#[derive(Debug, Clone)]
pub struct Submission {
    pub input: StorageObject,
    pub params: ExportParams,
    pub output_url: String,
    pub user_token: String,
}

/// In-memory [`ForgeService`] with scripted outcomes.
pub struct FakeForge {
    pub prepare: Outcome,
    pub submit: Outcome,
    pub status: Outcome,
    pub cancel: Outcome,
    pub create_version: Outcome,
    pub manifest: serde_json::Value,
    pub submissions: Mutex<Vec<Submission>>,
    pub cancelled: Mutex<Vec<String>>,
    pub versions: Mutex<Vec<(String, String)>>,
}

impl Default for FakeForge {
    fn default() -> Self {
        Self {
            prepare: Outcome::Ok,
            submit: Outcome::Ok,
            status: Outcome::Ok,
            cancel: Outcome::Ok,
            create_version: Outcome::Ok,
            manifest: serde_json::json!({ "derivatives": [] }),
            submissions: Mutex::new(Vec::new()),
            cancelled: Mutex::new(Vec::new()),
            versions: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ForgeService for FakeForge {
    async fn prepare_output_url(&self) -> Result<String, ForgeApiError> {
        self.prepare.check()?;
        Ok(SIGNED_URL.to_string())
    }

    async fn submit_export(
        &self,
        input: &StorageObject,
        params: &ExportParams,
        output_url: &str,
        user_token: &str,
    ) -> Result<WorkitemInfo, ForgeApiError> {
        self.submit.check()?;
        let mut submissions = self.submissions.lock().unwrap();
        submissions.push(Submission {
            input: input.clone(),
            params: params.clone(),
            output_url: output_url.to_string(),
            user_token: user_token.to_string(),
        });
        Ok(WorkitemInfo {
            id: format!("wi-{}", submissions.len()),
            status: WorkitemStatus::Pending,
            report_url: None,
        })
    }

    async fn workitem_status(&self, workitem_id: &str) -> Result<serde_json::Value, ForgeApiError> {
        self.status.check()?;
        Ok(serde_json::json!({
            "id": workitem_id,
            "status": "inprogress",
            "stats": { "timeQueued": "2026-10-16T10:00:00Z" },
        }))
    }

    async fn cancel_workitem(&self, workitem_id: &str) -> Result<(), ForgeApiError> {
        self.cancel.check()?;
        self.cancelled.lock().unwrap().push(workitem_id.to_string());
        Ok(())
    }

    async fn create_version(
        &self,
        project_id: &str,
        _payload: &serde_json::Value,
        user_token: &str,
    ) -> Result<(), ForgeApiError> {
        self.versions
            .lock()
            .unwrap()
            .push((project_id.to_string(), user_token.to_string()));
        self.create_version.check()
    }

    async fn manifest(
        &self,
        _urn: &str,
        _user_token: &str,
    ) -> Result<serde_json::Value, ForgeApiError> {
        Ok(self.manifest.clone())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 1,
        static_dir: None,
    }
}

/// Everything a test needs to drive the app and observe its side effects.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub forge: Arc<FakeForge>,
}

impl TestApp {
    pub fn new(forge: FakeForge) -> Self {
        let forge = Arc::new(forge);
        let config = test_config();
        let state = AppState {
            forge: Arc::clone(&forge) as Arc<dyn ForgeService>,
            tracker: Arc::new(WorkitemTracker::new()),
            ws_manager: Arc::new(WsManager::new()),
            event_bus: Arc::new(EventBus::default()),
        };
        let router = build_app_router(state.clone(), &config);
        Self {
            router,
            state,
            forge,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WorkitemNotification> {
        self.state.event_bus.subscribe()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new(FakeForge::default())
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Wait for the next notification on the bus.
pub async fn next_notification(
    rx: &mut broadcast::Receiver<WorkitemNotification>,
) -> WorkitemNotification {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for a notification")
        .expect("event bus closed")
}
