mod config;
mod errors;
mod gap;
mod models;
mod recommender;
mod routes;
mod skills;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::recommender::client::HttpRecommendationClient;
use crate::routes::build_router;
use crate::skills::extractor::KeywordSkillExtractor;
use crate::skills::store::{InMemorySkillStore, RedisSkillStore, SkillStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on invalid numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("skillsync_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillSync API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize skill store (Redis when configured, else in-memory)
    let skill_store: Arc<dyn SkillStore> = match &config.redis_url {
        Some(url) => {
            let redis = redis::Client::open(url.as_str())?;
            info!(
                "Redis skill store initialized (slot prefix: {})",
                config.skill_slot_prefix
            );
            Arc::new(RedisSkillStore::new(redis, config.skill_slot_prefix.clone()))
        }
        None => {
            info!("REDIS_URL not set; using in-memory skill store");
            Arc::new(InMemorySkillStore::new())
        }
    };

    // Initialize recommendation provider client
    let recommender = HttpRecommendationClient::new(
        &config.recommender_url,
        config.recommender_timeout,
        config.recommender_retry_base,
    );
    info!("Recommendation provider: {}", recommender.endpoint());

    // Initialize skill extractor (KeywordSkillExtractor by default)
    let extractor = KeywordSkillExtractor::default();
    info!("Skill extractor catalog: {} skills", extractor.catalog_len());

    // Build app state
    let state = AppState {
        skill_store,
        recommender: Arc::new(recommender),
        extractor: Arc::new(extractor),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // dashboard is served from another origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
