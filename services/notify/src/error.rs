//! Custom error types for the notification service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Ways a report notification request can fail
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Report id, listing or reporter absent from the payload
    #[error("Missing required data")]
    MissingData,

    /// No email API key configured
    #[error("Email service not configured")]
    NotConfigured,

    /// Anything that went wrong after validation, with its cause
    #[error("Failed to send notification: {0}")]
    Delivery(String),
}

impl IntoResponse for NotifyError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            NotifyError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "error": "Method not allowed" }),
            ),
            NotifyError::MissingData => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Missing required data" }),
            ),
            NotifyError::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Email service not configured" }),
            ),
            NotifyError::Delivery(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed to send notification",
                    "details": details,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for notification results
pub type NotifyResult<T> = Result<T, NotifyError>;
