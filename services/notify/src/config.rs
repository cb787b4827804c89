//! Notification service configuration

use anyhow::Result;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@mercatech-pr.com";
pub const DEFAULT_FROM: &str = "MercaTech <noreply@mercatech-pr.com>";
pub const DEFAULT_SITE_URL: &str = "https://mercatech-pr.netlify.app";
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

/// Settings for the report notification endpoint
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Resend API key; without it every notification is refused
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    /// Recipient of report notifications
    pub admin_email: String,
    pub from: String,
    /// Base of the listing links in the email
    pub site_url: String,
    pub bind_addr: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            resend_api_url: DEFAULT_RESEND_API_URL.to_string(),
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            from: DEFAULT_FROM.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            bind_addr: "0.0.0.0:3001".to_string(),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl NotifyConfig {
    /// Create a new NotifyConfig from environment variables
    ///
    /// # Environment Variables
    /// - `RESEND_API_KEY`: Resend API key (no default; empty counts as unset)
    /// - `RESEND_API_URL`: API base URL (default: "https://api.resend.com")
    /// - `ADMIN_EMAIL`: Notification recipient (default: "admin@mercatech-pr.com")
    /// - `NOTIFY_FROM`: Sender (default: "MercaTech <noreply@mercatech-pr.com>")
    /// - `SITE_URL`: Public site URL (default: "https://mercatech-pr.netlify.app")
    /// - `NOTIFY_BIND_ADDR`: Listen address (default: "0.0.0.0:3001")
    pub fn from_env() -> Result<Self> {
        let resend_api_key = std::env::var("RESEND_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let resend_api_url = env_or("RESEND_API_URL", DEFAULT_RESEND_API_URL)
            .trim_end_matches('/')
            .to_string();
        reqwest::Url::parse(&resend_api_url)
            .map_err(|e| anyhow::anyhow!("Invalid RESEND_API_URL {}: {}", resend_api_url, e))?;

        Ok(NotifyConfig {
            resend_api_key,
            resend_api_url,
            admin_email: env_or("ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL),
            from: env_or("NOTIFY_FROM", DEFAULT_FROM),
            site_url: env_or("SITE_URL", DEFAULT_SITE_URL)
                .trim_end_matches('/')
                .to_string(),
            bind_addr: env_or("NOTIFY_BIND_ADDR", "0.0.0.0:3001"),
        })
    }
}
