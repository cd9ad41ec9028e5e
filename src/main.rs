use std::sync::Arc;

use movie_recs_api::{
    config::Config,
    db::{create_pool, memory::sample_history, HistoryStore, InMemoryHistoryStore, PgHistoryStore},
    routes::{create_router, AppState},
    services::providers::{CatalogClient, TmdbClient},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog: Arc<dyn CatalogClient> = Arc::new(TmdbClient::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    )?);

    let store: Arc<dyn HistoryStore> = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url).await?;
            let store = PgHistoryStore::new(pool, config.user_id.clone());
            if config.seed_sample_data {
                store.seed(&sample_history()).await?;
            }
            tracing::info!(user_id = %config.user_id, "Using PostgreSQL history store");
            Arc::new(store)
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory sample history");
            Arc::new(InMemoryHistoryStore::with_sample_data())
        }
    };

    let state = AppState::new(
        store,
        catalog.clone(),
        config.recommendation_genre_ids.clone(),
        config.discovery_genre_ids.clone(),
    );
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        addr = %config.bind_addr(),
        catalog = catalog.name(),
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
