//! jobdetails server: reads config from the environment, prepares the store, serves the API.
//!
//! Run from repo root: `cargo run -p jobdetails-server`

use jobdetails::{apply_migrations, app_router, connect, telemetry, AppConfig, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::from_env()?;
    telemetry::init_tracing(&config.log_filter)?;

    let state = match config.database_url.as_deref() {
        Some(url) => {
            let pool = connect(&config, url).await?;
            apply_migrations(&pool).await?;
            AppState::postgres(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store, data is lost on exit");
            AppState::in_memory()
        }
    };

    let app = app_router(state, config.body_limit_bytes);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
