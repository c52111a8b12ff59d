use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Failures a single prediction request can end in.
#[derive(Debug)]
pub enum ApiError {
    /// The application failed domain validation; one message per issue.
    Validation(Vec<String>),
    /// The body could not be read as an application (bad JSON, missing or
    /// mistyped keys, wrong content type).
    Payload { status: StatusCode, detail: String },
    /// The model raised while scoring the row.
    Inference(anyhow::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(issues) => write!(f, "Invalid application: {}", issues.join("; ")),
            ApiError::Payload { status, detail } => write!(f, "Bad payload ({status}): {detail}"),
            ApiError::Inference(e) => write!(f, "Inference failed: {e:#}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Payload {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(issues) => {
                tracing::warn!(issues = ?issues, "Rejected invalid application");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "detail": issues })),
                )
                    .into_response()
            }
            ApiError::Payload { status, detail } => {
                tracing::warn!(%status, detail = %detail, "Rejected unreadable payload");
                (status, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::Inference(e) => {
                tracing::error!(error = %format!("{e:#}"), "Prediction failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": format!("{e:#}") })),
                )
                    .into_response()
            }
        }
    }
}
