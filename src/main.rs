use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use mood_journal::{
    app::{self, AppState},
    clock::SystemClock,
    config::Config,
    store::FileStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,mood_journal=debug")),
        )
        .init();

    let config = Config::from_env();

    let state = AppState::new(
        Arc::new(FileStore::new(&config.data_dir)),
        Arc::new(SystemClock),
        config.streak_counting,
    );
    let app = app::app(state, &config.static_dir);

    // Print the link to the server
    tracing::info!("Server running at http://{}", config.addr);
    tracing::info!("Static files: {}", config.static_dir.display());
    tracing::info!("Data dir:     {}", config.data_dir.display());
    tracing::info!("API base:     http://{}/api", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
