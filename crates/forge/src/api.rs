//! REST client for the Forge/APS HTTP endpoints.
//!
//! Each method maps to one endpoint and takes the bearer token to use, so
//! the same client serves both application (2-legged) and user (3-legged)
//! calls.

use fbx_export_core::storage::StorageObject;
use fbx_export_core::workitem::{WorkitemInfo, WorkitemSpec};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::error::ForgeApiError;

/// Content type required by the Data Management API.
const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

/// HTTP client for the Forge REST API.
#[derive(Clone)]
pub struct ForgeApi {
    client: reqwest::Client,
    base_url: String,
}

/// Response of the OAuth token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
}

/// Object metadata returned after an upload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDetails {
    pub bucket_key: String,
    pub object_key: String,
}

/// Signed URL access level: the workitem writes the zip, the browser reads it.
const SIGNED_ACCESS_READ_WRITE: &str = "readwrite";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBucket<'a> {
    bucket_key: &'a str,
    policy_key: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignedResourceRequest {
    minutes_expiration: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignedResourceResponse {
    signed_url: String,
}

impl ForgeApi {
    /// Create a new API client for the given host.
    ///
    /// * `base_url` - e.g. `https://developer.api.autodesk.com`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    // ---- OAuth ----

    /// Request an application token with the client-credentials grant.
    pub async fn request_token(
        &self,
        client_id: &str,
        client_secret: &str,
        scopes: &str,
    ) -> Result<TokenResponse, ForgeApiError> {
        let response = self
            .client
            .post(self.url(&["authentication", "v2", "token"])?)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", scopes)])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- OSS ----

    /// Create a bucket. An already existing bucket is not an error.
    pub async fn create_bucket(
        &self,
        token: &str,
        bucket_key: &str,
        policy_key: &str,
    ) -> Result<(), ForgeApiError> {
        let response = self
            .client
            .post(self.url(&["oss", "v2", "buckets"])?)
            .bearer_auth(token)
            .json(&CreateBucket {
                bucket_key,
                policy_key,
            })
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            tracing::debug!(bucket_key, "Bucket already exists");
            return Ok(());
        }
        Self::check_status(response).await
    }

    /// Upload `data` as an object, replacing any previous content.
    pub async fn upload_object(
        &self,
        token: &str,
        bucket_key: &str,
        object_key: &str,
        data: Vec<u8>,
    ) -> Result<ObjectDetails, ForgeApiError> {
        let response = self
            .client
            .put(self.url(&["oss", "v2", "buckets", bucket_key, "objects", object_key])?)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(data)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Create a read/write signed URL for an object.
    pub async fn create_signed_resource(
        &self,
        token: &str,
        bucket_key: &str,
        object_key: &str,
        minutes_expiration: u32,
    ) -> Result<String, ForgeApiError> {
        let mut url = self.url(&[
            "oss", "v2", "buckets", bucket_key, "objects", object_key, "signed",
        ])?;
        url.query_pairs_mut().append_pair("access", SIGNED_ACCESS_READ_WRITE);

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&SignedResourceRequest { minutes_expiration })
            .send()
            .await?;

        let signed: SignedResourceResponse = Self::parse_response(response).await?;
        Ok(signed.signed_url)
    }

    /// Download URL of a stored object.
    pub fn object_url(&self, object: &StorageObject) -> Result<String, ForgeApiError> {
        let url = self.url(&[
            "oss",
            "v2",
            "buckets",
            &object.bucket_key,
            "objects",
            &object.object_key,
        ])?;
        Ok(url.into())
    }

    // ---- Design Automation ----

    /// Submit a workitem. Returns the assigned id and initial status.
    pub async fn submit_workitem(
        &self,
        token: &str,
        region: &str,
        spec: &WorkitemSpec,
    ) -> Result<WorkitemInfo, ForgeApiError> {
        let response = self
            .client
            .post(self.url(&["da", region, "v3", "workitems"])?)
            .bearer_auth(token)
            .json(spec)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the full status document of a workitem.
    pub async fn get_workitem(
        &self,
        token: &str,
        region: &str,
        workitem_id: &str,
    ) -> Result<serde_json::Value, ForgeApiError> {
        let response = self
            .client
            .get(self.url(&["da", region, "v3", "workitems", workitem_id])?)
            .bearer_auth(token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Ask the service to cancel a workitem.
    ///
    /// This has no effect once the workitem has started processing.
    pub async fn cancel_workitem(
        &self,
        token: &str,
        region: &str,
        workitem_id: &str,
    ) -> Result<(), ForgeApiError> {
        let response = self
            .client
            .delete(self.url(&["da", region, "v3", "workitems", workitem_id])?)
            .bearer_auth(token)
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- Data Management ----

    /// Create a new version of an item. Only `201 Created` counts as success.
    pub async fn post_version(
        &self,
        token: &str,
        project_id: &str,
        payload: &serde_json::Value,
    ) -> Result<(), ForgeApiError> {
        let response = self
            .client
            .post(self.url(&["data", "v1", "projects", project_id, "versions"])?)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, JSON_API_CONTENT_TYPE)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ForgeApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    // ---- Model Derivative ----

    /// Fetch the derivative manifest of a translated model.
    pub async fn get_manifest(
        &self,
        token: &str,
        urn: &str,
    ) -> Result<serde_json::Value, ForgeApiError> {
        let response = self
            .client
            .get(self.url(&["modelderivative", "v2", "designdata", urn, "manifest"])?)
            .bearer_auth(token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Join percent-encoded path segments onto the base URL.
    fn url(&self, segments: &[&str]) -> Result<Url, ForgeApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ForgeApiError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ForgeApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Ensure the response has a success status code.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ForgeApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ForgeApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ForgeApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ForgeApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_url_encodes_object_key() {
        let api = ForgeApi::new("https://developer.api.autodesk.com/");
        let object = StorageObject {
            bucket_key: "wip.dm.prod".into(),
            object_key: "folder/my model.rvt".into(),
        };
        assert_eq!(
            api.object_url(&object).unwrap(),
            "https://developer.api.autodesk.com/oss/v2/buckets/wip.dm.prod/objects/folder%2Fmy%20model.rvt"
        );
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let api = ForgeApi::new("not a url");
        let object = StorageObject {
            bucket_key: "b".into(),
            object_key: "o".into(),
        };
        assert!(matches!(
            api.object_url(&object),
            Err(ForgeApiError::InvalidUrl(_))
        ));
    }
}
