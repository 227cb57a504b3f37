//! Message Boards
//!
//! Server-rendered boards and comments kept in a flat key-value store.

mod config;
mod db;
mod dispatch;
mod errors;
mod handlers;
mod ids;
mod models;
mod render;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use render::{HtmlRenderer, Renderer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub renderer: Arc<dyn Renderer>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Message Boards");
    tracing::info!("Store backend: {:?}", config.store);
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if !config.enforce_comment_length {
        tracing::warn!(
            "Comment text length is not bounded (set BOARDS_ENFORCE_COMMENT_LENGTH=true to cap it)"
        );
    }

    // Initialize store
    let store = db::open_store(&config).await?;
    let repo = Arc::new(Repository::new(store));

    // Create application state
    let state = AppState {
        repo,
        renderer: Arc::new(HtmlRenderer::new()),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router.
///
/// Path matching is done by [`dispatch::resolve`], so every request goes
/// through the single fallback handler.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(handlers::dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
