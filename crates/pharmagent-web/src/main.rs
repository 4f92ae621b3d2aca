//! Pharmagent Web Server
//!
//! Run with: cargo run -p pharmagent-web

use tracing::info;
use tracing_subscriber::EnvFilter;

use pharmagent_common::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    info!("Starting Pharmagent Web Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let addr = config.bind_addr();
    let state = pharmagent_web::state::AppState::new(config)?;
    let app = pharmagent_web::router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
