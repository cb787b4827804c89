//! Auth service configuration

use anyhow::Result;

/// Settings for the auth HTTP service and its session persistence
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Public site URL the OAuth flow returns to
    pub site_url: String,
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Name of the persisted session slot
    pub session_storage_key: String,
    /// Lifetime of the persisted session
    pub session_ttl_seconds: u64,
}

impl AuthConfig {
    /// Create a new AuthConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SITE_URL`: Public site URL (default: "http://localhost:5173")
    /// - `AUTH_BIND_ADDR`: Listen address (default: "0.0.0.0:3000")
    /// - `SESSION_STORAGE_KEY`: Session slot name (default: "mercatech-auth")
    /// - `SESSION_TTL_SECONDS`: Persisted session lifetime (default: 604800)
    pub fn from_env() -> Result<Self> {
        let site_url = std::env::var("SITE_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .trim_end_matches('/')
            .to_string();

        let bind_addr =
            std::env::var("AUTH_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let session_storage_key =
            std::env::var("SESSION_STORAGE_KEY").unwrap_or_else(|_| "mercatech-auth".to_string());

        let session_ttl_seconds = std::env::var("SESSION_TTL_SECONDS")
            .unwrap_or_else(|_| "604800".to_string())
            .parse::<u64>()
            .map_err(|_| anyhow::anyhow!("SESSION_TTL_SECONDS must be a positive integer"))?;

        Ok(AuthConfig {
            site_url,
            bind_addr,
            session_storage_key,
            session_ttl_seconds,
        })
    }

    /// Where the provider sends the user back after OAuth sign-in
    pub fn callback_url(&self) -> String {
        format!("{}/auth/callback", self.site_url)
    }
}
