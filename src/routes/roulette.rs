use axum::{
    extract::{Path, Query, State},
    Json,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::collections::HashSet;

use crate::{
    error::{AppError, AppResult},
    models::RecommendationResult,
    routes::{AppState, LimitQuery},
    services::Mood,
};

#[derive(Debug, Serialize)]
pub struct MoodInfo {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub genres: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SpinResponse {
    pub mood: Mood,
    pub mood_score: usize,
    pub movie: RecommendationResult,
}

async fn watched_titles(state: &AppState) -> AppResult<HashSet<String>> {
    let items = state.store.all_items().await?;
    Ok(items.into_iter().map(|item| item.title).collect())
}

/// Handler for random unseen titles
pub async fn random(
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> AppResult<Json<Vec<RecommendationResult>>> {
    let limit = params.validated()?;
    let exclude = watched_titles(&state).await?;

    let mut rng = StdRng::from_entropy();
    let movies = state
        .discovery
        .discover_unseen(&exclude, limit, &mut rng)
        .await;

    Ok(Json(
        movies.into_iter().map(RecommendationResult::from).collect(),
    ))
}

/// Handler listing the available moods
pub async fn moods() -> Json<Vec<MoodInfo>> {
    let moods = Mood::all()
        .iter()
        .map(|mood| {
            let config = mood.config();
            MoodInfo {
                name: mood.as_str(),
                keywords: config.keywords,
                genres: crate::models::resolve_genre_names(config.genre_ids),
            }
        })
        .collect();
    Json(moods)
}

/// Handler for a single mood roulette spin
pub async fn spin(
    State(state): State<AppState>,
    Path(mood): Path<String>,
) -> AppResult<Json<SpinResponse>> {
    let exclude = watched_titles(&state).await?;

    let mut rng = StdRng::from_entropy();
    let pick = state
        .moods
        .spin_for_mood(&mood, &exclude, &mut rng)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No unseen titles match mood '{}'", mood)))?;

    Ok(Json(SpinResponse {
        mood: pick.mood,
        mood_score: pick.mood_score,
        movie: RecommendationResult::from(pick.candidate),
    }))
}
