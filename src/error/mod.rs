use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::directory::DirectoryError;
use crate::dispatch::DispatchError;

/// Service-level errors for the routes that do not speak the admin envelope
/// (metrics) and for start-up.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] DispatchError),

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Faults raised while serving an admin operation.
///
/// These never reach the client as an HTTP error: the admin handlers fold them
/// into a failure envelope whose message is the `Display` text below.
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Check if running in production mode (based on RUN_MODE env var)
fn is_production() -> bool {
    std::env::var("RUN_MODE")
        .map(|m| m == "production" || m == "prod")
        .unwrap_or(false)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, generic) = match &self {
            AppError::Gateway(_) => ("GATEWAY_ERROR", "Push gateway unavailable"),
            AppError::Directory(_) => ("DIRECTORY_ERROR", "Role directory unavailable"),
            AppError::Internal(_) => ("INTERNAL_ERROR", "Internal server error"),
        };

        let log_message = self.to_string();
        let client_message = if is_production() {
            generic.to_string()
        } else {
            log_message.clone()
        };

        // Always log the detailed error server-side
        tracing::error!(
            code = %code,
            message = %log_message,
            "API error"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: client_message,
            },
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
