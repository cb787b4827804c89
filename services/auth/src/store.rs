//! Observable session and profile state
//!
//! [`AuthService`] owns one [`AuthState`] value published over a `watch`
//! channel. A background task started with [`AuthService::start`] keeps it in
//! sync with the provider's session events; the profile operations republish
//! it whenever the signed-in user's profile changes.

use common::models::{NewProfile, Profile, UpdateProfile};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast::error::RecvError, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    error::{AuthError, AuthResult},
    models::{Session, User},
    oauth::OAuthProvider,
    provider::{AuthEvent, AuthProvider},
    repositories::ProfileRepository,
    validation,
};

/// Identity of the current visitor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthState {
    pub user: Option<User>,
    pub profile: Option<Profile>,
    #[serde(skip)]
    pub session: Option<Session>,
    pub loading: bool,
}

impl AuthState {
    /// State before the first session lookup has finished
    pub fn initial() -> Self {
        Self {
            user: None,
            profile: None,
            session: None,
            loading: true,
        }
    }

    fn signed_out() -> Self {
        Self {
            loading: false,
            ..Self::initial()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Session/profile adapter shared by the HTTP handlers
pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileRepository>,
    redirect_to: String,
    state: watch::Sender<AuthState>,
}

impl AuthService {
    /// `redirect_to` is the OAuth callback URL handed to the provider
    pub fn new(
        provider: Arc<dyn AuthProvider>,
        profiles: Arc<dyn ProfileRepository>,
        redirect_to: String,
    ) -> Self {
        let (state, _) = watch::channel(AuthState::initial());
        Self {
            provider,
            profiles,
            redirect_to,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Load the initial session and follow provider events until the
    /// provider's event channel closes
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        // Subscribe first so events fired during the initial load are kept
        let mut events = self.provider.subscribe();

        tokio::spawn(async move {
            self.load_initial_session().await;

            loop {
                match events.recv().await {
                    Ok(AuthEvent::SignedIn(session)) => self.set_session(session).await,
                    Ok(AuthEvent::SignedOut) => {
                        info!("Signed out; clearing auth state");
                        self.state.send_replace(AuthState::signed_out());
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Auth event listener lagged, {} events skipped", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            info!("Auth event stream closed");
        })
    }

    async fn load_initial_session(&self) {
        match self.provider.get_session().await {
            Ok(Some(session)) => self.set_session(session).await,
            Ok(None) => {
                self.state.send_replace(AuthState::signed_out());
            }
            Err(e) => {
                error!("Error getting session: {}", e);
                self.state.send_replace(AuthState::signed_out());
            }
        }
    }

    async fn set_session(&self, session: Session) {
        let user = session.user.clone();
        let profile = self.get_profile(user.id).await;
        info!(
            "Auth state: user {} via {} (profile: {})",
            user.id,
            user.provider().unwrap_or("email"),
            profile.is_some()
        );

        self.state.send_replace(AuthState {
            user: Some(user),
            profile,
            session: Some(session),
            loading: false,
        });
    }

    async fn sign_in_with(&self, provider: OAuthProvider) -> AuthResult<String> {
        self.provider
            .sign_in_with_oauth(provider, &self.redirect_to)
            .await
            .map_err(|e| {
                error!("Error signing in with {}: {}", provider.as_str(), e);
                e
            })
    }

    /// Authorization URL for Google sign-in
    pub async fn sign_in_with_google(&self) -> AuthResult<String> {
        self.sign_in_with(OAuthProvider::Google).await
    }

    /// Authorization URL for Apple sign-in
    pub async fn sign_in_with_apple(&self) -> AuthResult<String> {
        self.sign_in_with(OAuthProvider::Apple).await
    }

    pub async fn sign_in(&self, provider: OAuthProvider) -> AuthResult<String> {
        match provider {
            OAuthProvider::Google => self.sign_in_with_google().await,
            OAuthProvider::Apple => self.sign_in_with_apple().await,
        }
    }

    /// Redeem the callback's authorization code. The state follows once the
    /// provider announces the new session.
    pub async fn complete_sign_in(&self, code: &str) -> AuthResult<User> {
        if code.trim().is_empty() {
            return Err(AuthError::InvalidCallback("missing code".to_string()));
        }

        let session = self.provider.exchange_code(code).await.map_err(|e| {
            error!("Error completing sign-in: {}", e);
            e
        })?;
        Ok(session.user)
    }

    pub async fn sign_out(&self) -> AuthResult<()> {
        self.provider.sign_out().await.map_err(|e| {
            error!("Error signing out: {}", e);
            e
        })
    }

    /// Profile of `user_id`, or `None` when there is no such row.
    ///
    /// Lookup failures are logged and also reported as `None`.
    pub async fn get_profile(&self, user_id: Uuid) -> Option<Profile> {
        match self.profiles.find_by_id(user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                error!("Error fetching profile {}: {}", user_id, e);
                None
            }
        }
    }

    async fn require_user(&self) -> AuthResult<User> {
        self.provider
            .get_user()
            .await
            .map_err(|e| {
                error!("Error getting user: {}", e);
                e
            })?
            .ok_or(AuthError::NotAuthenticated)
    }

    /// Create the signed-in user's profile
    pub async fn create_profile(&self, data: NewProfile) -> AuthResult<Profile> {
        let user = self.require_user().await?;
        validation::validate_new_profile(&data).map_err(AuthError::Validation)?;

        let profile = self.profiles.create(user.id, &data).await.map_err(|e| {
            error!("Error creating profile: {}", e);
            AuthError::Profile(e)
        })?;

        self.publish_profile(&profile);
        Ok(profile)
    }

    /// Update the signed-in user's own profile
    pub async fn update_profile(&self, changes: UpdateProfile) -> AuthResult<Profile> {
        let user = self.require_user().await?;
        if changes.is_empty() {
            return Err(AuthError::Validation("Nothing to update".to_string()));
        }

        let known = {
            let state = self.state.borrow();
            state
                .profile
                .as_ref()
                .filter(|p| p.id == user.id)
                .map(|p| p.contact_preference)
        };
        let current_preference = match known {
            Some(preference) => Some(preference),
            None => self
                .get_profile(user.id)
                .await
                .map(|p| p.contact_preference),
        };
        validation::validate_update(&changes, current_preference)
            .map_err(AuthError::Validation)?;

        let profile = self.profiles.update(user.id, &changes).await.map_err(|e| {
            error!("Error updating profile: {}", e);
            AuthError::Profile(e)
        })?;

        self.publish_profile(&profile);
        Ok(profile)
    }

    fn publish_profile(&self, profile: &Profile) {
        self.state.send_modify(|state| {
            state.profile = Some(profile.clone());
        });
    }
}
