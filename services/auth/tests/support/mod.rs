//! In-process stand-ins for the auth provider and the profiles table

#![allow(dead_code)]

use async_trait::async_trait;
use auth::repositories::ProfileRepository;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use common::models::{NewProfile, Profile, UpdateProfile};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const ANON_KEY: &str = "anon-key";
pub const USER_ID: &str = "7d1c3a2e-7b0a-4b7e-bf76-8f0e0c7d9a10";

pub fn user_id() -> Uuid {
    Uuid::parse_str(USER_ID).unwrap()
}

pub fn user_json() -> Value {
    json!({
        "id": USER_ID,
        "aud": "authenticated",
        "role": "authenticated",
        "email": "ana@example.com",
        "app_metadata": { "provider": "google" },
        "user_metadata": { "full_name": "Ana Rivera" }
    })
}

pub fn session_json(access_token: &str, refresh_token: &str, expires_at: i64) -> Value {
    json!({
        "access_token": access_token,
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": expires_at,
        "refresh_token": refresh_token,
        "user": user_json()
    })
}

/// Requests seen by the mock provider
#[derive(Clone, Default)]
pub struct MockGoTrue {
    pub token_requests: Arc<Mutex<Vec<(String, Value)>>>,
    pub logouts: Arc<Mutex<Vec<String>>>,
}

impl MockGoTrue {
    pub fn grants(&self) -> Vec<String> {
        self.token_requests
            .lock()
            .unwrap()
            .iter()
            .map(|(grant, _)| grant.clone())
            .collect()
    }
}

fn has_anon_key(headers: &HeaderMap) -> bool {
    headers.get("apikey").and_then(|v| v.to_str().ok()) == Some(ANON_KEY)
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn token(
    State(mock): State<MockGoTrue>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !has_anon_key(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "No API key found" })))
            .into_response();
    }

    let grant = query.get("grant_type").cloned().unwrap_or_default();
    mock.token_requests
        .lock()
        .unwrap()
        .push((grant.clone(), body.clone()));

    let expires_at = chrono::Utc::now().timestamp() + 3600;
    match grant.as_str() {
        "pkce" => {
            let verifier_sent = body["code_verifier"].as_str().is_some_and(|v| !v.is_empty());
            if body["auth_code"] == "good-code" && verifier_sent {
                Json(session_json("access-1", "refresh-1", expires_at)).into_response()
            } else {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_grant",
                        "error_description": "Invalid flow state"
                    })),
                )
                    .into_response()
            }
        }
        "refresh_token" if body["refresh_token"] == "refresh-1" => {
            Json(session_json("access-2", "refresh-2", expires_at)).into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid Refresh Token: Refresh Token Not Found"
            })),
        )
            .into_response(),
    }
}

async fn user(headers: HeaderMap) -> Response {
    match bearer(&headers).as_deref() {
        Some("access-1") | Some("access-2") => Json(user_json()).into_response(),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "invalid JWT" }))).into_response(),
    }
}

async fn logout(State(mock): State<MockGoTrue>, headers: HeaderMap) -> StatusCode {
    match bearer(&headers) {
        Some(token) => {
            mock.logouts.lock().unwrap().push(token);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::UNAUTHORIZED,
    }
}

/// Serve a fake `/auth/v1` API on a random local port; returns its base URL
pub async fn spawn_gotrue() -> (String, MockGoTrue) {
    let mock = MockGoTrue::default();
    let app = Router::new()
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/user", get(user))
        .route("/auth/v1/logout", post(logout))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), mock)
}

/// Profiles table kept in memory
#[derive(Default)]
pub struct InMemoryProfiles {
    rows: Mutex<HashMap<Uuid, Profile>>,
}

#[async_trait]
impl ProfileRepository for InMemoryProfiles {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Profile>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, id: Uuid, new_profile: &NewProfile) -> anyhow::Result<Profile> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&id) {
            anyhow::bail!("duplicate key value violates unique constraint \"profiles_pkey\"");
        }
        let now = chrono::Utc::now();
        let profile = Profile {
            id,
            display_name: new_profile.display_name.clone(),
            municipio: new_profile.municipio,
            contact_preference: new_profile.contact_preference,
            contact_info: new_profile.contact_info.clone(),
            avatar_url: new_profile.avatar_url.clone(),
            is_admin: false,
            created_at: now,
            updated_at: now,
        };
        rows.insert(id, profile.clone());
        Ok(profile)
    }

    async fn update(&self, id: Uuid, changes: &UpdateProfile) -> anyhow::Result<Profile> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(&id) else {
            anyhow::bail!("Profile {} not found", id);
        };
        if let Some(name) = &changes.display_name {
            row.display_name = name.clone();
        }
        if let Some(municipio) = changes.municipio {
            row.municipio = municipio;
        }
        if let Some(preference) = changes.contact_preference {
            row.contact_preference = preference;
        }
        if let Some(info) = &changes.contact_info {
            row.contact_info = Some(info.clone());
        }
        if let Some(avatar) = &changes.avatar_url {
            row.avatar_url = Some(avatar.clone());
        }
        row.updated_at = chrono::Utc::now();
        Ok(row.clone())
    }
}
