//! Workitem model: the Design Automation request body, the statuses the
//! service reports, and the statuses pushed to browsers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::WorkitemId;

// ---------------------------------------------------------------------------
// Activity
// ---------------------------------------------------------------------------

/// Fully qualified activity id, `<nickname>.<activity>+<alias>`.
pub fn activity_id(nickname: &str, activity: &str, alias: &str) -> String {
    format!("{nickname}.{activity}+{alias}")
}

// ---------------------------------------------------------------------------
// Request body
// ---------------------------------------------------------------------------

/// One argument of a workitem: where to read or write a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkitemArgument {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

impl WorkitemArgument {
    /// A plain download argument.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            verb: None,
            headers: None,
        }
    }

    /// A download argument that needs the user's bearer token.
    pub fn get_with_bearer(url: impl Into<String>, token: &str) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        Self {
            url: url.into(),
            verb: None,
            headers: Some(headers),
        }
    }

    /// An argument that the service calls with the given HTTP verb.
    pub fn with_verb(url: impl Into<String>, verb: &str) -> Self {
        Self {
            url: url.into(),
            verb: Some(verb.to_string()),
            headers: None,
        }
    }
}

/// Arguments of the FBX export activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportArguments {
    pub rvt_file: WorkitemArgument,
    pub input_json: WorkitemArgument,
    pub output_zip: WorkitemArgument,
    pub on_complete: WorkitemArgument,
}

/// Body of `POST /workitems`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkitemSpec {
    pub activity_id: String,
    pub arguments: ExportArguments,
}

// ---------------------------------------------------------------------------
// Service-side status
// ---------------------------------------------------------------------------

/// Status of a workitem as reported by Design Automation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkitemStatus {
    Pending,
    InProgress,
    Success,
    Cancelled,
    FailedLimitDataSize,
    FailedLimitProcessingTime,
    FailedDownload,
    FailedInstructions,
    FailedUpload,
    FailedUploadOptional,
    /// A status this build does not know about, kept verbatim.
    Other(String),
}

impl WorkitemStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "inprogress",
            Self::Success => "success",
            Self::Cancelled => "cancelled",
            Self::FailedLimitDataSize => "failedLimitDataSize",
            Self::FailedLimitProcessingTime => "failedLimitProcessingTime",
            Self::FailedDownload => "failedDownload",
            Self::FailedInstructions => "failedInstructions",
            Self::FailedUpload => "failedUpload",
            Self::FailedUploadOptional => "failedUploadOptional",
            Self::Other(s) => s,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<String> for WorkitemStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "inprogress" => Self::InProgress,
            "success" => Self::Success,
            "cancelled" => Self::Cancelled,
            "failedLimitDataSize" => Self::FailedLimitDataSize,
            "failedLimitProcessingTime" => Self::FailedLimitProcessingTime,
            "failedDownload" => Self::FailedDownload,
            "failedInstructions" => Self::FailedInstructions,
            "failedUpload" => Self::FailedUpload,
            "failedUploadOptional" => Self::FailedUploadOptional,
            _ => Self::Other(value),
        }
    }
}

impl From<WorkitemStatus> for String {
    fn from(value: WorkitemStatus) -> Self {
        match value {
            WorkitemStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for WorkitemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workitem summary returned on submission and in webhook callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkitemInfo {
    pub id: WorkitemId,
    pub status: WorkitemStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Browser-side status
// ---------------------------------------------------------------------------

/// Status pushed to browsers on the notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationStatus {
    Started,
    Pending,
    Success,
    Completed,
    Failed,
    Cancelled,
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Started => "Started",
            Self::Pending => "Pending",
            Self::Success => "Success",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_id_format() {
        assert_eq!(
            activity_id("myapp", "ExportFBXActivity", "dev"),
            "myapp.ExportFBXActivity+dev"
        );
    }

    #[test]
    fn known_statuses_parse() {
        let s: WorkitemStatus = serde_json::from_str(r#""inprogress""#).unwrap();
        assert_eq!(s, WorkitemStatus::InProgress);

        let s: WorkitemStatus = serde_json::from_str(r#""failedDownload""#).unwrap();
        assert_eq!(s, WorkitemStatus::FailedDownload);
        assert!(!s.is_success());
    }

    #[test]
    fn unknown_status_is_preserved() {
        let s: WorkitemStatus = serde_json::from_str(r#""queuedSomewhere""#).unwrap();
        assert_eq!(s, WorkitemStatus::Other("queuedSomewhere".into()));
        assert_eq!(serde_json::to_string(&s).unwrap(), r#""queuedSomewhere""#);
    }

    #[test]
    fn workitem_info_reads_callback_body() {
        let body = r#"{"id":"wi-1","status":"success","reportUrl":"https://r","stats":{}}"#;
        let info: WorkitemInfo = serde_json::from_str(body).unwrap();
        assert_eq!(info.id, "wi-1");
        assert!(info.status.is_success());
        assert_eq!(info.report_url.as_deref(), Some("https://r"));
    }

    #[test]
    fn workitem_body_uses_service_argument_names() {
        let spec = WorkitemSpec {
            activity_id: "a.b+c".into(),
            arguments: ExportArguments {
                rvt_file: WorkitemArgument::get_with_bearer("https://in", "tok"),
                input_json: WorkitemArgument::get("data:application/json,{}"),
                output_zip: WorkitemArgument::with_verb("https://out", "put"),
                on_complete: WorkitemArgument::with_verb("https://cb", "post"),
            },
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["activityId"], "a.b+c");
        assert_eq!(json["arguments"]["rvtFile"]["headers"]["Authorization"], "Bearer tok");
        assert!(json["arguments"]["inputJson"].get("verb").is_none());
        assert_eq!(json["arguments"]["outputZip"]["verb"], "put");
        assert_eq!(json["arguments"]["onComplete"]["url"], "https://cb");
    }

    #[test]
    fn notification_status_wire_form() {
        assert_eq!(
            serde_json::to_string(&NotificationStatus::Completed).unwrap(),
            r#""Completed""#
        );
    }
}
