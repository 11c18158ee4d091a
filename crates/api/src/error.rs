use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{FormRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_core::error::{CoreError, Stage};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for pipeline errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses;
/// this is the only place an error becomes user-facing text.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A stage-tagged error from `catalog_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A malformed request body or parameter.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured upload limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

fn stage_status(stage: Stage) -> StatusCode {
    match stage {
        Stage::Validation | Stage::InvalidRequest => StatusCode::BAD_REQUEST,
        Stage::NotFound => StatusCode::NOT_FOUND,
        Stage::AssetWrite | Stage::AssetRead | Stage::Persistence => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, violations) = match &self {
            AppError::Core(core) => {
                let stage = core.stage();
                let status = stage_status(stage);
                let message = match core {
                    _ if status.is_server_error() => {
                        tracing::error!(stage = ?stage, error = %core, "Request failed");
                        INTERNAL_MESSAGE.to_string()
                    }
                    CoreError::NotFound { entity, id } => format!("{entity} with id {id} not found"),
                    CoreError::InvalidRequest(msg) => msg.clone(),
                    other => other.to_string(),
                };
                let violations = match core {
                    CoreError::Validation(violations) => Some(violations.clone()),
                    _ => None,
                };
                (status, stage.code(), message, violations)
            }

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Stage::InvalidRequest.code(),
                msg.clone(),
                None,
            ),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
                None,
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                    None,
                )
            }
        };

        let body = match violations {
            Some(errors) => json!({ "message": message, "code": code, "errors": errors }),
            None => json!({ "message": message, "code": code }),
        };

        (status, axum::Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Extractor rejections
// ---------------------------------------------------------------------------

/// Sort a rejection by the status axum would have sent on its own.
fn rejection(status: StatusCode, text: String) -> AppError {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::debug!(detail = %text, "Request body over limit");
            AppError::PayloadTooLarge("Request body exceeds the upload limit".to_string())
        }
        s if s.is_client_error() => AppError::BadRequest(text),
        _ => AppError::InternalError(text),
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        rejection(err.status(), err.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rej: MultipartRejection) -> Self {
        rejection(rej.status(), rej.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rej: PathRejection) -> Self {
        rejection(rej.status(), rej.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rej: QueryRejection) -> Self {
        rejection(rej.status(), rej.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rej: FormRejection) -> Self {
        rejection(rej.status(), rej.body_text())
    }
}
