use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use auth::{
    AppState,
    config::AuthConfig,
    gotrue::{GoTrueClient, GoTrueConfig},
    repositories::PgProfileRepository,
    routes,
    session::RedisSessionStorage,
    store::AuthService,
};
use common::{cache, database};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting authentication service");

    let config = AuthConfig::from_env()?;

    // Initialize database connection pool
    let db_config = database::DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Initialize Redis connection pool
    let redis_config = cache::RedisConfig::from_env()?;
    let redis_pool = cache::RedisPool::new(&redis_config).await?;

    let storage = RedisSessionStorage::new(
        redis_pool,
        &config.session_storage_key,
        config.session_ttl_seconds,
    );
    let provider = GoTrueClient::new(GoTrueConfig::from_env()?, Arc::new(storage));
    let profiles = PgProfileRepository::new(pool);

    let auth = Arc::new(AuthService::new(
        Arc::new(provider),
        Arc::new(profiles),
        config.callback_url(),
    ));
    auth.clone().start();

    info!("Authentication service initialized successfully");

    // Start the web server
    let app = routes::create_router(AppState { auth });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Authentication service listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
