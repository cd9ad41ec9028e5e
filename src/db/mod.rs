pub mod memory;
pub mod postgres;

pub use memory::InMemoryHistoryStore;
pub use postgres::{create_pool, PgHistoryStore};

use crate::{error::AppResult, models::HistoryItem};

/// Backing store for a user's watch history
///
/// Titles passed to the mutation methods are matched by dedup key
/// (trimmed, case-insensitive). The mutations return `false` when no
/// history item matches. Range checks on ratings happen before the store
/// is called.
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// All history items, rated and unrated, in storage order
    async fn all_items(&self) -> AppResult<Vec<HistoryItem>>;

    async fn set_rating(&self, title: &str, rating: f64) -> AppResult<bool>;

    async fn clear_rating(&self, title: &str) -> AppResult<bool>;
}
