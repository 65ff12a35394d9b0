//! Extractor for the user's Autodesk (3-legged) access token.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fbx_export_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// The caller's 3-legged token, taken from `Authorization: Bearer <token>`.
///
/// The token is not inspected here; Forge validates it when it is used.
#[derive(Debug, Clone)]
pub struct UserToken {
    pub token: String,
}

impl FromRequestParts<AppState> for UserToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            })?;

        Ok(UserToken {
            token: token.to_string(),
        })
    }
}
