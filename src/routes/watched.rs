use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    models::HistoryItem,
    routes::AppState,
    services::{history, stats},
};

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub rating: f64,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<stats::CategorySummary>,
}

/// Handler for the watch history list
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<HistoryItem>>> {
    let items = state.store.all_items().await?;
    Ok(Json(items))
}

/// Handler for setting a rating
pub async fn rate(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Json(request): Json<RatingRequest>,
) -> AppResult<StatusCode> {
    history::rate_title(state.store.as_ref(), &title, request.rating).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for removing a rating
pub async fn clear_rating(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<StatusCode> {
    history::clear_title_rating(state.store.as_ref(), &title).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for user statistics
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<stats::UserStats>> {
    let items = state.store.all_items().await?;
    Ok(Json(stats::user_stats(&items)))
}

/// Handler listing the categories present in the history
pub async fn categories(State(state): State<AppState>) -> AppResult<Json<CategoriesResponse>> {
    let items = state.store.all_items().await?;
    Ok(Json(CategoriesResponse {
        categories: stats::category_summaries(&items),
    }))
}

/// Handler for history items in one category
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<HistoryItem>>> {
    let items = state.store.all_items().await?;
    Ok(Json(stats::items_in_category(&items, &category)?))
}
