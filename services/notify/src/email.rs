//! Outbound email through the Resend HTTP API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

/// Message handed to an [`EmailSender`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Provider's receipt for an accepted message
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SentEmail {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Error, Debug)]
pub enum EmailError {
    /// The API answered with a non-success status
    #[error("Email service error: {0}")]
    Status(u16),

    #[error("Email service request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, EmailError>;
}

/// Resend API client
pub struct ResendClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl ResendClient {
    pub fn new(api_key: String, api_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, EmailError> {
        let response = self
            .http
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Resend API error: {}", body);
            return Err(EmailError::Status(status.as_u16()));
        }

        let sent: SentEmail = response.json().await?;
        info!("Email sent successfully: {:?}", sent.id);
        Ok(sent)
    }
}
