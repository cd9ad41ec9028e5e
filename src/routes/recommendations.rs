use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{PredictionResult, RecommendationResult},
    routes::{AppState, LimitQuery},
    services::prediction,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> AppResult<Json<Vec<RecommendationResult>>> {
    let limit = params.validated()?;
    let items = state.store.all_items().await?;

    tracing::info!(
        history = items.len(),
        limit = limit,
        "Processing recommendation request"
    );

    let recommendations = state.recommender.recommend(&items, limit).await;
    Ok(Json(recommendations))
}

/// Handler for rating predictions, highest predicted rating first
pub async fn predictions(State(state): State<AppState>) -> AppResult<Json<Vec<PredictionResult>>> {
    let items = state.store.all_items().await?;

    let mut predictions = prediction::batch_predict(&items);
    predictions.sort_by(|a, b| b.predicted_rating.total_cmp(&a.predicted_rating));

    Ok(Json(predictions))
}
