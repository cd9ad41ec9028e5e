//! Movie catalog abstraction
//!
//! The engines never talk HTTP themselves; they go through a `CatalogClient`.
//! `tmdb` is the production implementation, tests use mocks or fakes.

use crate::{
    error::AppResult,
    models::{CatalogCandidate, DiscoverQuery},
};

pub mod tmdb;

pub use tmdb::TmdbClient;

/// Trait for external movie catalogs
///
/// Every call is a single request/response. Implementations do not retry
/// and do not cache; callers decide how to contain failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search movies by title, optionally narrowed to a release year
    async fn search(&self, title: &str, year: Option<i32>) -> AppResult<Vec<CatalogCandidate>>;

    /// Catalog recommendations for a movie, at most `limit` entries
    async fn recommendations_for(&self, id: u64, limit: usize)
        -> AppResult<Vec<CatalogCandidate>>;

    /// Movies similar to a movie, at most `limit` entries
    async fn similar_to(&self, id: u64, limit: usize) -> AppResult<Vec<CatalogCandidate>>;

    /// One page of movies matching a genre and quality filter
    async fn discover(&self, query: &DiscoverQuery) -> AppResult<Vec<CatalogCandidate>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
