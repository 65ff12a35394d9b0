use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fbx_export_core::error::CoreError;
use fbx_export_forge::ForgeApiError;
use serde_json::json;

/// Message returned when Design Automation refuses an export workitem.
pub const EXPORT_FAILED_MESSAGE: &str = "failed to export FBXs from the RVT file";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`ForgeApiError`] for
/// upstream failures. Implements [`IntoResponse`] to produce consistent
/// JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `fbx_export_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A call to Forge failed.
    #[error(transparent)]
    Forge(#[from] ForgeApiError),

    /// Design Automation rejected the export workitem.
    #[error("{EXPORT_FAILED_MESSAGE}")]
    ExportFailed,

    /// The request body is missing or is not the expected JSON.
    #[error(transparent)]
    InvalidJson(#[from] JsonRejection),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Upstream errors ---
            AppError::Forge(err) => {
                tracing::error!(error = %err, "Forge request failed");
                internal()
            }
            AppError::ExportFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "EXPORT_FAILED",
                EXPORT_FAILED_MESSAGE.to_string(),
            ),
            AppError::InvalidJson(rejection) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                rejection.body_text(),
            ),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
