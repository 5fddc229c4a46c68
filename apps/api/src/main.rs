mod config;
mod db;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod quiz;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::extraction::HttpPageFetcher;
use crate::llm_client::LlmClient;
use crate::quiz::validation::ItemPolicy;
use crate::quiz::{QuizService, Synthesizer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting WikiQuiz API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize the generative capability; owned here, injected below
    let llm = LlmClient::new(config.anthropic_api_key.clone())
        .context("Failed to build LLM client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let fetcher = HttpPageFetcher::new(config.fetch_timeout)
        .context("Failed to build page fetcher")?;

    let policy = ItemPolicy {
        strict_answers: config.strict_answer_check,
    };
    let synthesizer = Synthesizer::new(Arc::new(llm), policy, config.generation_timeout);
    info!(
        "Quiz synthesis: timeout {}s, strict answers {}",
        config.generation_timeout.as_secs(),
        policy.strict_answers
    );

    let state = AppState {
        db,
        config: config.clone(),
        quiz: QuizService::new(Arc::new(fetcher), Arc::new(synthesizer)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
