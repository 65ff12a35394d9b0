//! Export parameters sent by the browser when starting an FBX export.
//!
//! The same JSON is forwarded verbatim to the Revit add-in as the
//! `inputJson` workitem argument, so the wire names stay camelCase.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Name of the empty object created in OSS to receive the exported zip.
pub const OUTPUT_FILE_NAME: &str = "exportedFBXs.zip";

/// Lifetime of the signed URL handed to the workitem for its output.
pub const OUTPUT_URL_EXPIRATION_MINUTES: u32 = 50;

/// Which 3D views of the model to export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportParams {
    /// Export every 3D view; `view_ids` is ignored when set.
    #[serde(default)]
    pub export_all: bool,
    /// Viewable ids picked in the view selector.
    #[serde(default)]
    pub view_ids: Vec<String>,
}

impl ExportParams {
    /// Check the parameters and return a normalized copy.
    ///
    /// View ids are trimmed and de-duplicated (first occurrence wins).
    /// A selective export must name at least one view.
    pub fn normalized(&self) -> Result<Self, CoreError> {
        if self.export_all {
            return Ok(Self {
                export_all: true,
                view_ids: Vec::new(),
            });
        }

        let mut view_ids: Vec<String> = Vec::with_capacity(self.view_ids.len());
        for raw in &self.view_ids {
            let id = raw.trim();
            if id.is_empty() {
                return Err(CoreError::Validation("View ids must not be blank".into()));
            }
            if !view_ids.iter().any(|existing| existing == id) {
                view_ids.push(id.to_string());
            }
        }

        if view_ids.is_empty() {
            return Err(CoreError::Validation("No 3D view selected".into()));
        }

        Ok(Self {
            export_all: false,
            view_ids,
        })
    }

    /// Encode the parameters as an inline `data:` URL for the workitem.
    pub fn to_data_url(&self) -> Result<String, CoreError> {
        let json = serde_json::to_string(self)
            .map_err(|e| CoreError::Internal(format!("Failed to encode export params: {e}")))?;
        Ok(format!("data:application/json,{json}"))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn selective(ids: &[&str]) -> ExportParams {
        ExportParams {
            export_all: false,
            view_ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn export_all_drops_view_ids() {
        let params = ExportParams {
            export_all: true,
            view_ids: vec!["a".into()],
        };
        let normalized = params.normalized().unwrap();
        assert!(normalized.export_all);
        assert!(normalized.view_ids.is_empty());
    }

    #[test]
    fn selective_export_requires_a_view() {
        let err = selective(&[]).normalized().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "No 3D view selected");
    }

    #[test]
    fn blank_view_id_is_rejected() {
        assert_matches!(
            selective(&["abc", "  "]).normalized(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn view_ids_are_trimmed_and_deduplicated() {
        let normalized = selective(&[" v1", "v2", "v1 "]).normalized().unwrap();
        assert_eq!(normalized.view_ids, vec!["v1", "v2"]);
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let params: ExportParams = serde_json::from_str(r#"{"viewIds":["x"]}"#).unwrap();
        assert!(!params.export_all);
        assert_eq!(params.view_ids, vec!["x"]);
    }

    #[test]
    fn data_url_embeds_camel_case_json() {
        let url = selective(&["v1"]).to_data_url().unwrap();
        assert_eq!(
            url,
            r#"data:application/json,{"exportAll":false,"viewIds":["v1"]}"#
        );
    }
}
