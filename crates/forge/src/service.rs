//! High-level Forge operations used by the HTTP handlers.
//!
//! [`ForgeService`] is the seam between the API crate and the cloud; the
//! production implementation is [`ForgeClient`], tests provide fakes.

use async_trait::async_trait;
use fbx_export_core::export::{ExportParams, OUTPUT_FILE_NAME, OUTPUT_URL_EXPIRATION_MINUTES};
use fbx_export_core::storage::{output_bucket_key, StorageObject};
use fbx_export_core::workitem::{ExportArguments, WorkitemArgument, WorkitemInfo, WorkitemSpec};

use crate::api::ForgeApi;
use crate::auth::ForgeAuth;
use crate::config::ForgeConfig;
use crate::error::ForgeApiError;

/// Bucket retention policy for export output.
const OUTPUT_BUCKET_POLICY: &str = "transient";

/// Operations the exporter performs against Forge.
#[async_trait]
pub trait ForgeService: Send + Sync {
    /// Prepare the output object and return a read/write signed URL for it.
    async fn prepare_output_url(&self) -> Result<String, ForgeApiError>;

    /// Submit the FBX export workitem for `input`.
    ///
    /// `user_token` is the 3-legged token allowed to read the source file.
    async fn submit_export(
        &self,
        input: &StorageObject,
        params: &ExportParams,
        output_url: &str,
        user_token: &str,
    ) -> Result<WorkitemInfo, ForgeApiError>;

    /// Current status document of a workitem, as returned by the service.
    async fn workitem_status(&self, workitem_id: &str) -> Result<serde_json::Value, ForgeApiError>;

    async fn cancel_workitem(&self, workitem_id: &str) -> Result<(), ForgeApiError>;

    /// Create a new item version on behalf of the user.
    async fn create_version(
        &self,
        project_id: &str,
        payload: &serde_json::Value,
        user_token: &str,
    ) -> Result<(), ForgeApiError>;

    /// Derivative manifest of a translated model.
    async fn manifest(&self, urn: &str, user_token: &str)
        -> Result<serde_json::Value, ForgeApiError>;
}

/// [`ForgeService`] backed by the real REST API.
pub struct ForgeClient {
    api: ForgeApi,
    auth: ForgeAuth,
    config: ForgeConfig,
}

impl ForgeClient {
    pub fn new(config: ForgeConfig) -> Self {
        let api = ForgeApi::new(config.base_url.clone());
        let auth = ForgeAuth::new(
            api.clone(),
            config.client_id.clone(),
            config.client_secret.clone(),
        );
        Self { api, auth, config }
    }

    /// Build the workitem body for an export.
    pub fn export_spec(
        &self,
        input: &StorageObject,
        params: &ExportParams,
        output_url: &str,
        user_token: &str,
    ) -> Result<WorkitemSpec, ForgeApiError> {
        let input_json = params
            .to_data_url()
            .map_err(|e| ForgeApiError::Encode(e.to_string()))?;

        Ok(WorkitemSpec {
            activity_id: self.config.activity_id(),
            arguments: ExportArguments {
                rvt_file: WorkitemArgument::get_with_bearer(self.api.object_url(input)?, user_token),
                input_json: WorkitemArgument::get(input_json),
                output_zip: WorkitemArgument::with_verb(output_url, "put"),
                on_complete: WorkitemArgument::with_verb(&self.config.webhook_url, "post"),
            },
        })
    }
}

#[async_trait]
impl ForgeService for ForgeClient {
    async fn prepare_output_url(&self) -> Result<String, ForgeApiError> {
        let token = self.auth.two_legged_token().await?;
        let bucket_key = output_bucket_key(&self.config.client_id);

        if let Err(e) = self
            .api
            .create_bucket(&token, &bucket_key, OUTPUT_BUCKET_POLICY)
            .await
        {
            // A later upload fails loudly if the bucket is really missing.
            tracing::warn!(bucket_key = %bucket_key, error = %e, "Failed to create output bucket");
        }

        let object = self
            .api
            .upload_object(&token, &bucket_key, OUTPUT_FILE_NAME, Vec::new())
            .await?;

        self.api
            .create_signed_resource(
                &token,
                &object.bucket_key,
                &object.object_key,
                OUTPUT_URL_EXPIRATION_MINUTES,
            )
            .await
    }

    async fn submit_export(
        &self,
        input: &StorageObject,
        params: &ExportParams,
        output_url: &str,
        user_token: &str,
    ) -> Result<WorkitemInfo, ForgeApiError> {
        let spec = self.export_spec(input, params, output_url, user_token)?;
        let token = self.auth.two_legged_token().await?;
        self.api
            .submit_workitem(&token, &self.config.da_region, &spec)
            .await
    }

    async fn workitem_status(&self, workitem_id: &str) -> Result<serde_json::Value, ForgeApiError> {
        let token = self.auth.two_legged_token().await?;
        self.api
            .get_workitem(&token, &self.config.da_region, workitem_id)
            .await
    }

    async fn cancel_workitem(&self, workitem_id: &str) -> Result<(), ForgeApiError> {
        let token = self.auth.two_legged_token().await?;
        self.api
            .cancel_workitem(&token, &self.config.da_region, workitem_id)
            .await
    }

    async fn create_version(
        &self,
        project_id: &str,
        payload: &serde_json::Value,
        user_token: &str,
    ) -> Result<(), ForgeApiError> {
        self.api.post_version(user_token, project_id, payload).await
    }

    async fn manifest(
        &self,
        urn: &str,
        user_token: &str,
    ) -> Result<serde_json::Value, ForgeApiError> {
        self.api.get_manifest(user_token, urn).await
    }
}
