//! Server entry point.
//!
//! Loads configuration (refusing to start without `GOOGLE_API_KEY`), builds
//! the Gemini runtime, and serves the task routes.

use std::sync::Arc;

use anyhow::Result;
use sous_config::AppConfig;
use sous_engine::RunnerCaller;
use sous_llm::GeminiRuntime;
use sous_server::{app, ServerState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = AppConfig::from_env()?;

    // The blocking client owns its own runtime thread; build it off the executor.
    let runtime = {
        let config = config.clone();
        tokio::task::spawn_blocking(move || {
            GeminiRuntime::new(&config.api_key, config.api_base(), config.request_timeout)
        })
        .await??
    };

    let caller = RunnerCaller::new(Arc::new(runtime));
    let state = Arc::new(ServerState::new(Arc::new(caller), config.model.clone()));

    info!("Starting server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
