use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cinematch_api::api::{create_router, AppState};
use cinematch_api::config::Config;
use cinematch_api::db::{create_pool, create_redis_client, Cache, PgProfileStore, ProfileStore};
use cinematch_api::services::providers::openrouter::OpenRouterProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    let store: Arc<dyn ProfileStore> = Arc::new(PgProfileStore::new(pool));

    let redis_client = create_redis_client(&config.redis_url)?;
    let (cache, _cache_writer) = Cache::new(redis_client).await;

    let provider = Arc::new(OpenRouterProvider::new(
        config.openrouter_api_key.clone(),
        config.openrouter_api_url.clone(),
        config.openrouter_model.clone(),
    ));

    let state = AppState::new(store, provider, cache);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "CineMatch API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
