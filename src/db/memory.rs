use tokio::sync::RwLock;

use crate::{
    db::HistoryStore,
    error::AppResult,
    models::{normalize_title, HistoryItem},
};

/// History kept in process memory
///
/// Used when no database is configured, and by tests.
pub struct InMemoryHistoryStore {
    items: RwLock<Vec<HistoryItem>>,
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemoryHistoryStore {
    pub fn new(items: Vec<HistoryItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Store preloaded with the bundled sample history
    pub fn with_sample_data() -> Self {
        Self::new(sample_history())
    }

    async fn update_rating(&self, title: &str, rating: Option<f64>) -> bool {
        let key = normalize_title(title);
        let mut items = self.items.write().await;
        match items.iter_mut().find(|item| item.dedup_key() == key) {
            Some(item) => {
                item.rating = rating;
                true
            }
            None => false,
        }
    }
}

#[async_trait::async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn all_items(&self) -> AppResult<Vec<HistoryItem>> {
        Ok(self.items.read().await.clone())
    }

    async fn set_rating(&self, title: &str, rating: f64) -> AppResult<bool> {
        Ok(self.update_rating(title, Some(rating)).await)
    }

    async fn clear_rating(&self, title: &str) -> AppResult<bool> {
        Ok(self.update_rating(title, None).await)
    }
}

fn sample(
    title: &str,
    year: &str,
    rating: Option<f64>,
    genres: &[&str],
    category: Option<&str>,
    overview: &str,
    external_score: f64,
) -> HistoryItem {
    HistoryItem {
        title: title.to_string(),
        year: year.to_string(),
        rating,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        category: category.map(str::to_string),
        overview: overview.to_string(),
        external_score,
        poster_ref: None,
    }
}

/// Six rated and three unrated horror titles
pub fn sample_history() -> Vec<HistoryItem> {
    vec![
        sample(
            "Copycat",
            "1995",
            Some(8.0),
            &["Horror", "Thriller", "Crime"],
            Some("creepy"),
            "A psychological thriller about a serial killer copycat.",
            6.6,
        ),
        sample(
            "Seven",
            "1995",
            Some(9.0),
            &["Horror", "Thriller", "Crime"],
            Some("mysterious"),
            "Two detectives hunt a serial killer who uses the seven deadly sins.",
            8.6,
        ),
        sample(
            "The Wailing",
            "2016",
            Some(9.0),
            &["Horror", "Mystery", "Thriller"],
            Some("mysterious"),
            "A mysterious illness spreads in a remote Korean village.",
            7.5,
        ),
        sample(
            "IT",
            "2017",
            Some(8.0),
            &["Horror", "Thriller"],
            Some("jumpscare"),
            "A group of kids face their fears against the evil clown Pennywise.",
            7.3,
        ),
        sample(
            "Hereditary",
            "2018",
            Some(8.0),
            &["Horror", "Drama", "Mystery"],
            Some("creepy"),
            "A family haunted by tragedy is haunted by something far worse.",
            7.3,
        ),
        sample(
            "Smile",
            "2022",
            Some(7.2),
            &["Horror", "Mystery", "Thriller"],
            Some("jumpscare"),
            "After witnessing a bizarre, traumatic incident, Dr. Rose Cotter starts experiencing frightening occurrences.",
            6.5,
        ),
        sample(
            "Together",
            "2021",
            None,
            &["Horror", "Drama"],
            None,
            "A pandemic horror story.",
            6.2,
        ),
        sample(
            "The Platform 2",
            "2024",
            None,
            &["Horror", "Sci-Fi", "Thriller"],
            Some("gory"),
            "Sequel to the dystopian thriller.",
            5.8,
        ),
        sample(
            "Cobweb",
            "2023",
            None,
            &["Horror", "Mystery"],
            Some("creepy"),
            "A young boy hears mysterious sounds from within the walls.",
            6.1,
        ),
    ]
}
