//! Error type for the authentication service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced by the auth provider, session storage and profile store
#[derive(Error, Debug)]
pub enum AuthError {
    /// An operation needed a signed-in user and there was none
    #[error("No authenticated user")]
    NotAuthenticated,

    /// The auth provider answered with an error
    #[error("Auth provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// The auth provider could not be reached or sent an unreadable answer
    #[error("Auth provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The OAuth callback could not be completed
    #[error("Invalid OAuth callback: {0}")]
    InvalidCallback(String),

    /// Persisting or loading the session failed
    #[error("Session storage error: {0}")]
    Storage(#[source] anyhow::Error),

    /// Sign-in requested for a provider we do not offer
    #[error("{0}")]
    UnsupportedProvider(String),

    /// Profile input rejected before reaching the database
    #[error("Invalid profile: {0}")]
    Validation(String),

    /// The profiles table rejected or failed the operation
    #[error("Profile store error: {0}")]
    Profile(#[source] anyhow::Error),
}

/// Type alias for auth results
pub type AuthResult<T> = Result<T, AuthError>;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AuthError::InvalidCallback(_)
            | AuthError::UnsupportedProvider(_)
            | AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Provider { .. } | AuthError::Http(_) => StatusCode::BAD_GATEWAY,
            AuthError::Storage(_) | AuthError::Profile(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
