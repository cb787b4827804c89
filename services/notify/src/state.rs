//! Application state shared across handlers

use std::sync::Arc;

use crate::{
    config::NotifyConfig,
    email::{EmailSender, ResendClient},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured
    pub sender: Option<Arc<dyn EmailSender>>,
    pub admin_email: String,
    pub from: String,
    pub site_url: String,
}

impl AppState {
    /// State backed by the Resend API, if a key is configured
    pub fn from_config(config: &NotifyConfig) -> Self {
        let sender = config.resend_api_key.as_ref().map(|key| {
            Arc::new(ResendClient::new(key.clone(), &config.resend_api_url))
                as Arc<dyn EmailSender>
        });

        Self::with_sender(config, sender)
    }

    pub fn with_sender(config: &NotifyConfig, sender: Option<Arc<dyn EmailSender>>) -> Self {
        Self {
            sender,
            admin_email: config.admin_email.clone(),
            from: config.from.clone(),
            site_url: config.site_url.clone(),
        }
    }
}
