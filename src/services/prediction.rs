use crate::models::{round_to_tenth, HistoryItem, PredictionResult};
use std::collections::HashSet;

/// Rating assumed when there is no history to learn from
const NEUTRAL_RATING: f64 = 7.0;
/// Confidence for the neutral prior and the all-ratings fallback
const BASELINE_CONFIDENCE: f64 = 0.3;
const MAX_CONFIDENCE: f64 = 0.9;
/// Overlapping ratings needed to reach full evidence (before the cap)
const EVIDENCE_SATURATION: f64 = 5.0;
/// Rated items required before batch predictions are produced
const MIN_RATED_FOR_BATCH: usize = 2;

/// Rating estimate with the evidence behind it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub rating: f64,
    pub confidence: f64,
}

/// Predicts a rating for `item` from the user's rated history
///
/// Averages the ratings of every rated item sharing at least one genre with
/// `item`. Without any overlap it falls back to the mean of all ratings at
/// baseline confidence; with no ratings at all it returns the neutral prior.
/// Unrated entries in `rated_history` are ignored.
pub fn predict_rating(item: &HistoryItem, rated_history: &[HistoryItem]) -> Prediction {
    let all_ratings: Vec<f64> = rated_history.iter().filter_map(|h| h.rating).collect();
    if all_ratings.is_empty() {
        return Prediction {
            rating: NEUTRAL_RATING,
            confidence: BASELINE_CONFIDENCE,
        };
    }

    let item_genres: HashSet<&str> = item.genres.iter().map(String::as_str).collect();
    let overlap_ratings: Vec<f64> = rated_history
        .iter()
        .filter(|h| h.genres.iter().any(|g| item_genres.contains(g.as_str())))
        .filter_map(|h| h.rating)
        .collect();

    if overlap_ratings.is_empty() {
        return Prediction {
            rating: round_to_tenth(mean(&all_ratings)),
            confidence: BASELINE_CONFIDENCE,
        };
    }

    Prediction {
        rating: round_to_tenth(mean(&overlap_ratings)),
        confidence: (overlap_ratings.len() as f64 / EVIDENCE_SATURATION).min(MAX_CONFIDENCE),
    }
}

/// Predicts ratings for every unrated item in `items`
///
/// Returns nothing when fewer than two items are rated. Output keeps the
/// input order of the unrated items; sorting is left to the caller.
pub fn batch_predict(items: &[HistoryItem]) -> Vec<PredictionResult> {
    let (rated, unrated): (Vec<HistoryItem>, Vec<HistoryItem>) =
        items.iter().cloned().partition(HistoryItem::is_rated);

    if rated.len() < MIN_RATED_FOR_BATCH {
        tracing::debug!(
            rated = rated.len(),
            required = MIN_RATED_FOR_BATCH,
            "Not enough rated items for predictions"
        );
        return Vec::new();
    }

    let predictions: Vec<PredictionResult> = unrated
        .into_iter()
        .map(|item| {
            let prediction = predict_rating(&item, &rated);
            PredictionResult {
                predicted_rating: prediction.rating,
                confidence: prediction.confidence,
                actual_external_score: item.external_score,
                title: item.title,
                year: item.year,
                genres: item.genres,
            }
        })
        .collect();

    tracing::info!(
        rated = rated.len(),
        predictions = predictions.len(),
        "Rating predictions computed"
    );

    predictions
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
