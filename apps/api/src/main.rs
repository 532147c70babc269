mod config;
mod db;
mod errors;
mod models;
mod parser;
mod resumes;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::parser::decoder::PdfDecoder;
use crate::parser::skills::SkillMatcher;
use crate::parser::vocabulary::SkillVocabulary;
use crate::parser::ResumeParser;
use crate::resumes::store::PgResumeStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Vocabulary is compiled once and shared read-only by every request
    let vocabulary = SkillVocabulary::builtin();
    let matcher = SkillMatcher::new(&vocabulary)?;
    info!("Skill vocabulary loaded ({} terms)", matcher.len());
    for (category, count) in vocabulary.category_counts() {
        debug!("  {category:?}: {count} terms");
    }
    let parser = ResumeParser::new(Arc::new(PdfDecoder), Arc::new(matcher));

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    info!(
        "Uploads stored under {} (max {} bytes, extraction budget {:?})",
        config.upload_dir.display(),
        config.max_upload_bytes,
        config.extract_timeout
    );

    // Build app state
    let state = AppState {
        store: Arc::new(PgResumeStore::new(db)),
        parser,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the frontend host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
