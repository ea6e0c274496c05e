use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The print surface refused to open. Kept apart from other export failures
    /// because the fix is on the user's side (permissions / pop-up settings).
    #[error("Export surface blocked: {0}")]
    SurfaceBlocked(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::NotStandalone => AppError::Validation(err.to_string()),
            ExportError::SurfaceBlocked(reason) => AppError::SurfaceBlocked(reason),
            ExportError::Surface(e) => AppError::Export(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::SurfaceBlocked(reason) => {
                tracing::warn!("Export surface blocked: {reason}");
                (
                    StatusCode::FORBIDDEN,
                    "EXPORT_SURFACE_BLOCKED",
                    "The print window was blocked. Allow pop-ups (or print access) for this site, then try the export again.".to_string(),
                )
            }
            AppError::Export(msg) => {
                tracing::error!("Export error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EXPORT_FAILED",
                    "The resume could not be printed. Please try again.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::SurfaceError;

    #[test]
    fn test_blocked_export_maps_to_forbidden() {
        let err = AppError::from(ExportError::SurfaceBlocked("denied".to_string()));
        assert!(matches!(err, AppError::SurfaceBlocked(_)));
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_surface_failure_maps_to_bad_gateway() {
        let err = AppError::from(ExportError::Surface(SurfaceError::Failed("x".to_string())));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
