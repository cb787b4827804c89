//! Client for the Supabase Auth (GoTrue) REST API
//!
//! Implements [`AuthProvider`] over `/auth/v1/*`: PKCE OAuth sign-in, code
//! exchange, refresh, user lookup and logout. The current session lives in
//! memory and in [`SessionStorage`]; every transition is broadcast as an
//! [`AuthEvent`].

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock, broadcast};
use tracing::{info, warn};

use crate::{
    error::{AuthError, AuthResult},
    models::{Session, User},
    oauth::{self, OAuthProvider},
    provider::{AuthEvent, AuthProvider},
    session::SessionStorage,
};

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// GoTrue connection settings
#[derive(Debug, Clone)]
pub struct GoTrueConfig {
    /// Project URL, e.g. `https://<project>.supabase.co`
    pub base_url: reqwest::Url,
    /// Public (anon) API key sent as the `apikey` header
    pub anon_key: String,
}

impl GoTrueConfig {
    /// Create a new GoTrueConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SUPABASE_URL`: Project URL
    /// - `SUPABASE_ANON_KEY`: Public API key
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("SUPABASE_URL")
            .map_err(|_| anyhow::anyhow!("SUPABASE_URL environment variable not set"))?;
        let anon_key = std::env::var("SUPABASE_ANON_KEY")
            .map_err(|_| anyhow::anyhow!("SUPABASE_ANON_KEY environment variable not set"))?;

        Self::new(&url, anon_key)
    }

    pub fn new(url: &str, anon_key: String) -> Result<Self> {
        let base_url = reqwest::Url::parse(url)
            .map_err(|e| anyhow::anyhow!("Invalid SUPABASE_URL {}: {}", url, e))?;
        Ok(Self { base_url, anon_key })
    }

    /// URL of an auth endpoint, keeping any path prefix of the base URL
    pub fn endpoint(&self, path: &str) -> reqwest::Url {
        let mut url = self.base_url.clone();
        let prefix = self.base_url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}/auth/v1/{}", prefix, path));
        url.set_query(None);
        url
    }
}

/// GoTrue-backed auth provider
pub struct GoTrueClient {
    config: GoTrueConfig,
    http: reqwest::Client,
    storage: Arc<dyn SessionStorage>,
    session: RwLock<Option<Session>>,
    pkce_verifier: Mutex<Option<String>>,
    events: broadcast::Sender<AuthEvent>,
}

impl GoTrueClient {
    pub fn new(config: GoTrueConfig, storage: Arc<dyn SessionStorage>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            config,
            http: reqwest::Client::new(),
            storage,
            session: RwLock::new(None),
            pkce_verifier: Mutex::new(None),
            events,
        }
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    fn emit(&self, event: AuthEvent) {
        // Err only means nobody is listening yet
        if self.events.send(event).is_err() {
            info!("Auth event dropped: no subscribers");
        }
    }

    /// In-memory session, falling back to persisted storage
    async fn current_session(&self) -> AuthResult<Option<Session>> {
        let cached = self.session.read().await.clone();
        if cached.is_some() {
            return Ok(cached);
        }

        let loaded = self.storage.load().await.map_err(AuthError::Storage)?;
        if let Some(session) = &loaded {
            info!("Restored persisted session for user: {}", session.user.id);
            *self.session.write().await = Some(session.clone());
        }
        Ok(loaded)
    }

    async fn store(&self, session: &Session) -> AuthResult<()> {
        *self.session.write().await = Some(session.clone());
        self.storage.save(session).await.map_err(AuthError::Storage)
    }

    async fn clear(&self) -> AuthResult<()> {
        *self.session.write().await = None;
        self.storage.remove().await.map_err(AuthError::Storage)
    }

    async fn token_request(
        &self,
        grant_type: &str,
        body: serde_json::Value,
    ) -> AuthResult<Session> {
        let mut url = self.config.endpoint("token");
        url.query_pairs_mut().append_pair("grant_type", grant_type);

        let response = self
            .http
            .post(url)
            .header("apikey", &self.config.anon_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let session: Session = response.json().await?;
        Ok(session.stamped(Self::now()))
    }

    async fn refresh(&self, refresh_token: &str) -> AuthResult<Session> {
        self.token_request("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
    }
}

/// Turn a non-success GoTrue response into an [`AuthError::Provider`]
async fn provider_error(response: reqwest::Response) -> AuthError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|m| m.as_str()).map(str::to_string))
        })
        .unwrap_or(body);

    AuthError::Provider { status, message }
}

#[async_trait]
impl AuthProvider for GoTrueClient {
    async fn get_session(&self) -> AuthResult<Option<Session>> {
        let Some(session) = self.current_session().await? else {
            return Ok(None);
        };

        if !session.is_expired(Self::now()) {
            return Ok(Some(session));
        }

        info!("Session for user {} expired, refreshing", session.user.id);
        match self.refresh(&session.refresh_token).await {
            Ok(refreshed) => {
                self.store(&refreshed).await?;
                self.emit(AuthEvent::TokenRefreshed(refreshed.clone()));
                Ok(Some(refreshed))
            }
            Err(AuthError::Provider { status, message }) => {
                warn!("Refresh rejected ({}): {}; signing out", status, message);
                self.clear().await?;
                self.emit(AuthEvent::SignedOut);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn get_user(&self) -> AuthResult<Option<User>> {
        let Some(session) = self.get_session().await? else {
            return Ok(None);
        };

        let response = self
            .http
            .get(self.config.endpoint("user"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("User lookup rejected: {}", response.status());
            return Ok(None);
        }

        Ok(Some(response.json().await?))
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> AuthResult<String> {
        let request =
            oauth::authorize_request(self.config.endpoint("authorize"), provider, redirect_to);
        *self.pkce_verifier.lock().await = Some(request.pkce_verifier.secret().clone());
        Ok(request.url.to_string())
    }

    async fn exchange_code(&self, code: &str) -> AuthResult<Session> {
        let verifier = self
            .pkce_verifier
            .lock()
            .await
            .take()
            .ok_or_else(|| AuthError::InvalidCallback("no sign-in in progress".to_string()))?;

        let session = self
            .token_request(
                "pkce",
                json!({ "auth_code": code, "code_verifier": verifier }),
            )
            .await?;

        self.store(&session).await?;
        info!("User {} signed in", session.user.id);
        self.emit(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        if let Some(session) = self.current_session().await? {
            let response = self
                .http
                .post(self.config.endpoint("logout"))
                .header("apikey", &self.config.anon_key)
                .bearer_auth(&session.access_token)
                .send()
                .await?;

            // 401/404: the token is already gone server-side
            let status = response.status().as_u16();
            if !response.status().is_success() && status != 401 && status != 404 {
                return Err(provider_error(response).await);
            }
        }

        self.clear().await?;
        info!("User signed out");
        self.emit(AuthEvent::SignedOut);
        Ok(())
    }
}
