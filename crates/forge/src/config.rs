use fbx_export_core::workitem::activity_id;

/// Default host of all Forge/APS endpoints.
pub const DEFAULT_BASE_URL: &str = "https://developer.api.autodesk.com";

/// Forge application credentials and Design Automation settings.
#[derive(Debug, Clone)]
pub struct ForgeConfig {
    pub client_id: String,
    pub client_secret: String,
    /// API host, overridable so tests can point at a local server.
    pub base_url: String,
    /// Public URL Design Automation calls when a workitem finishes.
    pub webhook_url: String,
    /// Design Automation region segment, e.g. `us-east`.
    pub da_region: String,
    pub da_nickname: String,
    pub da_activity_name: String,
    pub da_activity_alias: String,
}

impl ForgeConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                            | Default                         |
    /// |------------------------------------|---------------------------------|
    /// | `FORGE_CLIENT_ID`                  | required                        |
    /// | `FORGE_CLIENT_SECRET`              | required                        |
    /// | `FORGE_BASE_URL`                   | `https://developer.api.autodesk.com` |
    /// | `FORGE_WEBHOOK_URL`                | local callback route            |
    /// | `DESIGN_AUTOMATION_REGION`         | `us-east`                       |
    /// | `DESIGN_AUTOMATION_NICKNAME`       | the client id                   |
    /// | `DESIGN_AUTOMATION_ACTIVITY_NAME`  | `ExportFBXActivity`             |
    /// | `DESIGN_AUTOMATION_ACTIVITY_ALIAS` | `dev`                           |
    pub fn from_env() -> Self {
        let client_id = std::env::var("FORGE_CLIENT_ID").expect("FORGE_CLIENT_ID must be set");
        let client_secret =
            std::env::var("FORGE_CLIENT_SECRET").expect("FORGE_CLIENT_SECRET must be set");

        let env_or = |key: &str, default: &str| {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Self {
            base_url: env_or("FORGE_BASE_URL", DEFAULT_BASE_URL),
            webhook_url: env_or(
                "FORGE_WEBHOOK_URL",
                "http://localhost:3000/api/forge/callback/designautomation",
            ),
            da_region: env_or("DESIGN_AUTOMATION_REGION", "us-east"),
            da_nickname: env_or("DESIGN_AUTOMATION_NICKNAME", &client_id),
            da_activity_name: env_or("DESIGN_AUTOMATION_ACTIVITY_NAME", "ExportFBXActivity"),
            da_activity_alias: env_or("DESIGN_AUTOMATION_ACTIVITY_ALIAS", "dev"),
            client_id,
            client_secret,
        }
    }

    /// Fully qualified id of the export activity.
    pub fn activity_id(&self) -> String {
        activity_id(
            &self.da_nickname,
            &self.da_activity_name,
            &self.da_activity_alias,
        )
    }
}
