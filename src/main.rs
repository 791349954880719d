use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod api;
mod audio;
mod config;
mod error;
mod health;
mod poem;
mod upstream;

use api::routes::{create_router, AppState};
use config::Config;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Configuration from environment; refuse to start without it
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Photo Poem Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!(
        "Vision model: {}, chat model: {}, speech model: {}",
        config.clarifai.model_id,
        config.openai.chat_model,
        config.openai.tts_model
    );

    // Create app state
    let http = reqwest::Client::builder()
        .user_agent(concat!("photo-poem-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build HTTP client");
    let state = match AppState::new(&config, http) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    // Create router
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
