use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use notify::{AppState, config::NotifyConfig, routes};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting notification service");

    let config = NotifyConfig::from_env()?;
    if config.resend_api_key.is_none() {
        warn!("RESEND_API_KEY not set; report notifications will be refused");
    }

    let app = routes::create_router(AppState::from_config(&config));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Notification service listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
