mod config;
mod db;
mod errors;
mod llm;
mod models;
mod repositories;
mod routes;
mod services;
mod state;

use anyhow::Result;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing/logging
    init_tracing();

    tracing::info!("Starting shoe store API server...");

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!(
        "Loaded configuration: server={}:{}",
        config.server.host,
        config.server.port
    );

    // Create database connection pool and bootstrap the schema
    let pool = db::create_pool(&config.database.url, config.database.max_connections).await?;
    db::init_schema(&pool).await?;

    // Pick the reply generator: Gemini when credentials are available,
    // the offline generator otherwise
    let generator: Arc<dyn llm::ResponseGenerator> = match config.gemini.api_key.clone() {
        Some(api_key) => {
            tracing::info!("Initializing Gemini client (model={})", config.gemini.model);
            Arc::new(llm::GeminiGenerator::new(llm::GeminiClient::new(
                api_key,
                config.gemini.model.clone(),
            )))
        }
        None => {
            tracing::warn!(
                "GEMINI_API_KEY not set - chat replies will use the offline generator"
            );
            Arc::new(llm::ScriptedGenerator::new())
        }
    };

    // Create app state
    let state = state::AppState::new(pool, config.clone(), generator);

    // Build router with middleware
    let app = routes::create_router(state).layer(
        ServiceBuilder::new()
            // Logging layer
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            // CORS layer
            .layer(CorsLayer::permissive()),
    );

    // Start server
    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Health check available at http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shoestore_api=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
