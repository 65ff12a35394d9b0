//! In-memory list of workitems awaiting their webhook callback.
//!
//! Entries live only as long as the process; a restart forgets every
//! outstanding export.

use fbx_export_core::types::{Timestamp, WorkitemId};
use tokio::sync::RwLock;

/// Request to store the workitem output as a new item version.
///
/// The FBX export route never sets one; it is attached with
/// [`TrackedWorkitem::with_create_version`] by exports that write back into
/// a Docs project, and `complete_workitem` posts it on success.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateVersion {
    pub project_id: String,
    /// JSON:API body for `POST /projects/{id}/versions`.
    pub payload: serde_json::Value,
}

/// A submitted workitem and everything needed to finish it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedWorkitem {
    pub workitem_id: WorkitemId,
    /// The user's 3-legged token, used for follow-up Data Management calls.
    pub access_token: String,
    pub create_version: Option<CreateVersion>,
    /// Signed URL of the exported zip.
    pub output_url: String,
    pub submitted_at: Timestamp,
}

impl TrackedWorkitem {
    pub fn new(
        workitem_id: impl Into<WorkitemId>,
        access_token: impl Into<String>,
        output_url: impl Into<String>,
    ) -> Self {
        Self {
            workitem_id: workitem_id.into(),
            access_token: access_token.into(),
            create_version: None,
            output_url: output_url.into(),
            submitted_at: chrono::Utc::now(),
        }
    }

    pub fn with_create_version(mut self, create_version: CreateVersion) -> Self {
        self.create_version = Some(create_version);
        self
    }
}

/// Outstanding workitems, matched by id with a linear scan.
#[derive(Default)]
pub struct WorkitemTracker {
    items: RwLock<Vec<TrackedWorkitem>>,
}

impl WorkitemTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a workitem. A stale entry with the same id is replaced.
    pub async fn track(&self, item: TrackedWorkitem) {
        let mut items = self.items.write().await;
        items.retain(|existing| existing.workitem_id != item.workitem_id);
        tracing::debug!(workitem_id = %item.workitem_id, "Tracking workitem");
        items.push(item);
    }

    pub async fn get(&self, workitem_id: &str) -> Option<TrackedWorkitem> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.workitem_id == workitem_id)
            .cloned()
    }

    /// Stop tracking a workitem, returning its entry if it was present.
    pub async fn remove(&self, workitem_id: &str) -> Option<TrackedWorkitem> {
        let mut items = self.items.write().await;
        let index = items
            .iter()
            .position(|item| item.workitem_id == workitem_id)?;
        Some(items.remove(index))
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}
