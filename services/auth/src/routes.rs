//! Authentication service routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use common::models::{NewProfile, UpdateProfile};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::AuthError, oauth::OAuthProvider};

/// Query string the provider appends to the callback URL
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/auth/state", get(auth_state))
        .route("/auth/sign-in/:provider", post(sign_in))
        .route("/auth/callback", get(callback))
        .route("/auth/sign-out", post(sign_out))
        .route("/profiles/:id", get(get_profile))
        .route("/profile", post(create_profile).patch(update_profile))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

/// Current user, profile and loading flag
pub async fn auth_state(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.auth.current())
}

/// Start OAuth sign-in; the client follows the returned URL
pub async fn sign_in(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<impl IntoResponse, AuthError> {
    let provider: OAuthProvider = provider.parse().map_err(AuthError::UnsupportedProvider)?;
    info!("Sign-in requested with {}", provider.as_str());

    let url = state.auth.sign_in(provider).await?;
    Ok(Json(json!({ "url": url })))
}

/// OAuth redirect target
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AuthError> {
    if let Some(error) = params.error {
        return Err(AuthError::InvalidCallback(
            params.error_description.unwrap_or(error),
        ));
    }

    let code = params
        .code
        .ok_or_else(|| AuthError::InvalidCallback("missing code".to_string()))?;

    let user = state.auth.complete_sign_in(&code).await?;
    Ok(Json(json!({ "user": user })))
}

pub async fn sign_out(State(state): State<AppState>) -> Result<impl IntoResponse, AuthError> {
    state.auth.sign_out().await?;
    Ok(Json(json!({ "success": true })))
}

/// Profile by id, `null` when there is none
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    Json(state.auth.get_profile(id).await)
}

/// Create the signed-in user's profile
pub async fn create_profile(
    State(state): State<AppState>,
    Json(payload): Json<NewProfile>,
) -> Result<impl IntoResponse, AuthError> {
    let profile = state.auth.create_profile(payload).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Update the signed-in user's profile
pub async fn update_profile(
    State(state): State<AppState>,
    Json(payload): Json<UpdateProfile>,
) -> Result<impl IntoResponse, AuthError> {
    let profile = state.auth.update_profile(payload).await?;
    Ok(Json(profile))
}
