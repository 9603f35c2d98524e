use prompt_perfecter::models::Config;
use prompt_perfecter::openai::OpenAiClient;
use prompt_perfecter::routes::{self, AlwaysAllow, AppState};
use prompt_perfecter::store::SessionStore;

use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    // Missing credential is startup-fatal, never a runtime error.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Using API key: {}...",
        &config.api_key[..std::cmp::min(10, config.api_key.len())]
    );
    tracing::info!("Using model: {}", config.model);

    let state = AppState {
        sessions: SessionStore::new(),
        openai: Arc::new(OpenAiClient::new(config.api_key, config.model)),
        limiter: Arc::new(AlwaysAllow),
    };

    let app = routes::router(state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "Starting server");
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}
