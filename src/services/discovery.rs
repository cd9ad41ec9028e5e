use crate::{
    models::{title_set, CatalogCandidate, DiscoverQuery, SortBy},
    services::providers::CatalogClient,
};
use rand::{seq::SliceRandom, Rng};
use std::collections::HashSet;
use std::sync::Arc;

const MIN_PAGES: usize = 2;
const MAX_PAGES: usize = 5;
const MIN_SCORE: f64 = 5.0;
const MIN_VOTE_COUNT: u32 = 50;

/// Number of discover pages fetched for a request of `limit` titles
pub fn pages_to_fetch(limit: usize) -> usize {
    (limit / 10).clamp(MIN_PAGES, MAX_PAGES)
}

/// Random mode: popular, decently rated titles the user has not seen
pub struct DiscoveryEngine {
    catalog: Arc<dyn CatalogClient>,
    genre_ids: Vec<u64>,
}

impl DiscoveryEngine {
    pub fn new(catalog: Arc<dyn CatalogClient>, genre_ids: Vec<u64>) -> Self {
        Self { catalog, genre_ids }
    }

    /// Up to `limit` unseen titles in random order
    ///
    /// `exclude_titles` is matched case-insensitively. Pages that fail to
    /// load are skipped.
    pub async fn discover_unseen<R>(
        &self,
        exclude_titles: &HashSet<String>,
        limit: usize,
        rng: &mut R,
    ) -> Vec<CatalogCandidate>
    where
        R: Rng + ?Sized,
    {
        let excluded = title_set(exclude_titles);
        let pages = pages_to_fetch(limit);
        let mut pool = Vec::new();

        for page in 1..=pages {
            let query = DiscoverQuery {
                genre_ids: self.genre_ids.clone(),
                page: page as u32,
                sort_by: SortBy::PopularityDesc,
                min_score: Some(MIN_SCORE),
                min_vote_count: Some(MIN_VOTE_COUNT),
            };

            match self.catalog.discover(&query).await {
                Ok(candidates) => pool.extend(
                    candidates
                        .into_iter()
                        .filter(|c| !excluded.contains(&c.dedup_key())),
                ),
                Err(e) => {
                    tracing::warn!(page = page, error = %e, "Skipping discover page");
                }
            }
        }

        pool.shuffle(rng);
        pool.truncate(limit);

        tracing::info!(
            pages = pages,
            excluded = excluded.len(),
            results = pool.len(),
            "Random titles discovered"
        );

        pool
    }
}
