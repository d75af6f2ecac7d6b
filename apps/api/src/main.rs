mod config;
mod corpus;
mod db;
mod errors;
mod generation;
mod grading;
mod models;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::corpus::memory::MemoryCorpus;
use crate::corpus::sqlite::SqliteCorpus;
use crate::corpus::Corpus;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::session::store::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hifz API v{}", env!("CARGO_PKG_VERSION"));

    // Open the corpus
    let pool = create_pool(&config.database_url).await?;
    let sqlite = SqliteCorpus::new(pool);
    let corpus: Arc<dyn Corpus> = if config.preload_corpus {
        let snapshot = MemoryCorpus::new(sqlite.load_all().await?);
        info!("Corpus preloaded ({} verses)", snapshot.verse_count());
        Arc::new(snapshot)
    } else {
        info!("Serving corpus queries from SQLite");
        Arc::new(sqlite)
    };

    info!("Generation policy: {:?}", config.policy);

    // Build app state
    let state = AppState {
        corpus,
        policy: config.policy.clone(),
        sessions: SessionStore::new(config.max_sessions),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
