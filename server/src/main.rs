//! Products API server.
//!
//! Configured from the environment (a `.env` file is honoured):
//! `PRODUCTS_DB_PATH`, `PRODUCTS_DB_MAX_CONNECTIONS`, `BIND_ADDR`, `RUST_LOG`.

use products_api::{app, store, AppConfig, AppState};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("products_api=info,products_server=info,tower_http=info")
            }),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = store::connect(&config.store).await?;
    let state = AppState::new(pool.clone());

    let router = app(state).layer(TraceLayer::new_for_http());
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("store closed, exiting");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
