use axum::{
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::HistoryStore,
    error::{AppError, AppResult},
    services::{providers::CatalogClient, DiscoveryEngine, MoodSelector, RecommendationEngine},
};

pub mod recommendations;
pub mod roulette;
pub mod watched;

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 100;

/// Shared handler state
///
/// Engines are stateless; they are built once and shared.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HistoryStore>,
    pub recommender: Arc<RecommendationEngine>,
    pub discovery: Arc<DiscoveryEngine>,
    pub moods: Arc<MoodSelector>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn HistoryStore>,
        catalog: Arc<dyn CatalogClient>,
        recommendation_genre_ids: Vec<u64>,
        discovery_genre_ids: Vec<u64>,
    ) -> Self {
        Self {
            store,
            recommender: Arc::new(RecommendationEngine::new(
                catalog.clone(),
                recommendation_genre_ids,
            )),
            discovery: Arc::new(DiscoveryEngine::new(catalog.clone(), discovery_genre_ids)),
            moods: Arc::new(MoodSelector::new(catalog)),
        }
    }
}

/// `?limit=` query parameter
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl LimitQuery {
    pub fn validated(&self) -> AppResult<usize> {
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(AppError::InvalidInput(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }
        Ok(self.limit)
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/movies", movie_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Routes under /api/movies
fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/watched", get(watched::list))
        .route(
            "/watched/:title/rating",
            put(watched::rate).delete(watched::clear_rating),
        )
        .route("/stats", get(watched::stats))
        .route("/categories", get(watched::categories))
        .route("/by-category/:category", get(watched::by_category))
        .route("/recommendations", get(recommendations::recommend))
        .route("/predictions", get(recommendations::predictions))
        .route("/random", get(roulette::random))
        .route("/moods", get(roulette::moods))
        .route("/roulette/:mood", get(roulette::spin))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
