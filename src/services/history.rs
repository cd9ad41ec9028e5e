use crate::{
    db::HistoryStore,
    error::{AppError, AppResult},
};

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 10.0;

/// Rejects ratings outside [1, 10]
pub fn validate_rating(rating: f64) -> AppResult<()> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::InvalidInput(format!(
            "Rating must be between {} and {}, got {}",
            MIN_RATING, MAX_RATING, rating
        )));
    }
    Ok(())
}

/// Records the user's rating for a watched title
pub async fn rate_title(store: &dyn HistoryStore, title: &str, rating: f64) -> AppResult<()> {
    validate_rating(rating)?;

    if !store.set_rating(title, rating).await? {
        return Err(AppError::NotFound(format!("No watched title named '{}'", title)));
    }

    tracing::info!(title = %title, rating = rating, "Rating saved");
    Ok(())
}

/// Marks a watched title as unrated again
pub async fn clear_title_rating(store: &dyn HistoryStore, title: &str) -> AppResult<()> {
    if !store.clear_rating(title).await? {
        return Err(AppError::NotFound(format!("No watched title named '{}'", title)));
    }

    tracing::info!(title = %title, "Rating cleared");
    Ok(())
}
