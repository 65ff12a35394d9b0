//! Two-legged application token with in-memory caching.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::api::ForgeApi;
use crate::error::ForgeApiError;

/// Scopes requested for the application token.
pub const TWO_LEGGED_SCOPES: &str =
    "code:all data:write data:read bucket:create bucket:delete bucket:read";

/// Tokens are refreshed this long before they actually expire.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Issues and caches the application's client-credentials token.
pub struct ForgeAuth {
    api: ForgeApi,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<CachedToken>>,
}

impl ForgeAuth {
    pub fn new(api: ForgeApi, client_id: String, client_secret: String) -> Self {
        Self {
            api,
            client_id,
            client_secret,
            cached: Mutex::new(None),
        }
    }

    /// Return a valid application token, fetching a new one if needed.
    ///
    /// Holding the lock across the request keeps concurrent callers from
    /// each requesting their own token.
    pub async fn two_legged_token(&self) -> Result<String, ForgeApiError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Utc::now() {
                return Ok(token.access_token.clone());
            }
        }

        let response = self
            .api
            .request_token(&self.client_id, &self.client_secret, TWO_LEGGED_SCOPES)
            .await?;

        let lifetime = (response.expires_in - EXPIRY_MARGIN_SECS).max(0);
        let token = CachedToken {
            access_token: response.access_token,
            expires_at: Utc::now() + Duration::seconds(lifetime),
        };
        tracing::debug!(expires_at = %token.expires_at, "Obtained two-legged token");

        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }
}

