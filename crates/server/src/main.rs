//! Sentinel auth service binary.

use std::sync::Arc;

use sentinel_application::AuthService;
use sentinel_infrastructure::{
    HttpIdentityProvider, InMemorySessionStore, JwtCodec, SystemClock,
};
use sentinel_server::ServerConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let codec = JwtCodec::new(&config.hmac_secret)?;
    let identity = HttpIdentityProvider::new(config.user_service_url.clone())?;
    let service = Arc::new(AuthService::new(
        codec,
        InMemorySessionStore::new(),
        identity,
        SystemClock::new(),
        config.token_policy(),
    ));

    tracing::info!(
        "starting Sentinel auth service v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.addr
    );

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, sentinel_server::router(service)).await?;

    Ok(())
}
