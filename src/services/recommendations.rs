use crate::{
    error::AppResult,
    models::{normalize_title, CatalogCandidate, HistoryItem, RecommendationResult},
    services::providers::CatalogClient,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Ratings at or above this make an item a preferred seed
const SEED_RATING_THRESHOLD: f64 = 7.0;
const MAX_SEEDS: usize = 3;
/// Entries requested from each of the recommendations and similar endpoints
const EXPANSION_LIMIT: usize = 8;

/// Alternate search strings for titles the catalog spells differently
///
/// Keyed by normalized title.
const TITLE_ALIASES: &[(&str, &[&str])] = &[("seven", &["Se7en"]), ("it", &["It"])];

/// Search strings to try for a title: the title itself, then its aliases
pub fn title_variants(title: &str) -> Vec<String> {
    let mut variants = vec![title.to_string()];
    let key = normalize_title(title);

    if let Some((_, aliases)) = TITLE_ALIASES.iter().find(|(canonical, _)| *canonical == key) {
        for alias in aliases.iter() {
            if !variants.iter().any(|v| v.as_str() == *alias) {
                variants.push(alias.to_string());
            }
        }
    }

    variants
}

/// Picks the history items recommendations are seeded from
///
/// Items rated at least 7.0 are preferred; if there are none, any rated
/// item qualifies. The highest-rated three are returned, ties keeping
/// history order.
pub fn select_seeds(history: &[HistoryItem]) -> Vec<&HistoryItem> {
    let rated: Vec<&HistoryItem> = history.iter().filter(|h| h.is_rated()).collect();

    let mut seeds: Vec<&HistoryItem> = rated
        .iter()
        .copied()
        .filter(|h| h.rating.is_some_and(|r| r >= SEED_RATING_THRESHOLD))
        .collect();
    if seeds.is_empty() {
        seeds = rated;
    }

    seeds.sort_by(|a, b| {
        b.rating
            .unwrap_or_default()
            .total_cmp(&a.rating.unwrap_or_default())
    });
    seeds.truncate(MAX_SEEDS);
    seeds
}

/// Chooses the catalog entry matching a seed
///
/// An exact release-year match wins; otherwise the first result.
fn pick_match<'a>(results: &'a [CatalogCandidate], year: &str) -> Option<&'a CatalogCandidate> {
    let year = year.trim();
    if !year.is_empty() {
        if let Some(exact) = results.iter().find(|c| c.year() == year) {
            return Some(exact);
        }
    }
    results.first()
}

/// Keeps the first occurrence of each normalized title, up to `limit`
pub fn dedup_by_title(candidates: Vec<CatalogCandidate>, limit: usize) -> Vec<CatalogCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.dedup_key()))
        .take(limit)
        .collect()
}

/// Generates watch recommendations from the user's history
///
/// Seeds from the top-rated history items, expands each seed through the
/// catalog's recommendations and similar-titles endpoints, keeps candidates
/// in the allowed genres, then deduplicates by title.
pub struct RecommendationEngine {
    catalog: Arc<dyn CatalogClient>,
    allowed_genres: Vec<u64>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<dyn CatalogClient>, allowed_genres: Vec<u64>) -> Self {
        Self {
            catalog,
            allowed_genres,
        }
    }

    /// Recommends at most `limit` titles
    ///
    /// A seed whose lookup fails is logged and skipped, so a catalog outage
    /// degrades to an empty list rather than an error.
    pub async fn recommend(
        &self,
        history: &[HistoryItem],
        limit: usize,
    ) -> Vec<RecommendationResult> {
        let seeds = select_seeds(history);
        if seeds.is_empty() {
            tracing::info!("No rated history items to seed recommendations from");
            return Vec::new();
        }

        let mut pool = Vec::new();
        for seed in &seeds {
            match self.expand_seed(seed).await {
                Ok(candidates) => {
                    tracing::debug!(
                        seed = %seed.title,
                        candidates = candidates.len(),
                        "Seed expanded"
                    );
                    pool.extend(candidates);
                }
                Err(e) => {
                    tracing::warn!(seed = %seed.title, error = %e, "Skipping seed");
                }
            }
        }

        let recommendations: Vec<RecommendationResult> = dedup_by_title(pool, limit)
            .into_iter()
            .map(RecommendationResult::from)
            .collect();

        tracing::info!(
            seeds = seeds.len(),
            results = recommendations.len(),
            limit = limit,
            "Recommendations generated"
        );

        recommendations
    }

    /// Catalog id for a seed, trying each title variant in turn
    async fn resolve_seed(&self, seed: &HistoryItem) -> AppResult<Option<u64>> {
        for variant in title_variants(&seed.title) {
            let results = self.catalog.search(&variant, None).await?;
            if let Some(found) = pick_match(&results, &seed.year) {
                tracing::debug!(
                    seed = %seed.title,
                    variant = %variant,
                    catalog_id = found.id,
                    "Seed matched in catalog"
                );
                return Ok(Some(found.id));
            }
        }
        Ok(None)
    }

    /// Allowed-genre candidates reachable from one seed
    async fn expand_seed(&self, seed: &HistoryItem) -> AppResult<Vec<CatalogCandidate>> {
        let Some(catalog_id) = self.resolve_seed(seed).await? else {
            tracing::info!(seed = %seed.title, "Seed not found in catalog");
            return Ok(Vec::new());
        };

        let mut candidates = self
            .catalog
            .recommendations_for(catalog_id, EXPANSION_LIMIT)
            .await?;
        candidates.extend(self.catalog.similar_to(catalog_id, EXPANSION_LIMIT).await?);

        Ok(candidates
            .into_iter()
            .filter(|c| c.has_any_genre(&self.allowed_genres))
            .collect())
    }
}
