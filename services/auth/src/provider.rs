//! Port to the external authentication provider

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::{
    error::AuthResult,
    models::{Session, User},
    oauth::OAuthProvider,
};

/// Session transitions announced by the provider
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SignedIn(Session),
    SignedOut,
    TokenRefreshed(Session),
}

/// Operations the auth adapter consumes from the provider SDK
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current session, if any (refreshed first when expired)
    async fn get_session(&self) -> AuthResult<Option<Session>>;

    /// User behind the current session, as confirmed by the provider
    async fn get_user(&self) -> AuthResult<Option<User>>;

    /// Listen for session transitions
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;

    /// Start the OAuth redirect flow; returns the URL to send the user to
    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> AuthResult<String>;

    /// Redeem the authorization code delivered to the callback URL
    async fn exchange_code(&self, code: &str) -> AuthResult<Session>;

    async fn sign_out(&self) -> AuthResult<()>;
}
