use anyhow::Context;
use tracing_subscriber::EnvFilter;

use treepz_admin::{app, config, is_production, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up ADMIN_API_BASE_URL, EXCHANGE_RATE_API_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("treepz_admin=info,tower_http=info")),
        )
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Treepz admin in {:?} mode", config.environment);
    if is_production!() && !config.security.secure_cookies {
        tracing::warn!("production session cookies are issued without the Secure flag");
    }

    let state = AppState::new(config.clone())?;
    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!(
        upstream = %config.upstream.base_url,
        assets = %config.server.assets_dir.display(),
        "Treepz admin listening on http://{}",
        bind_addr
    );

    axum::serve(listener, app(state)).await.context("server")?;
    Ok(())
}
