use crate::{
    error::{AppError, AppResult},
    models::{round_to_tenth, HistoryItem},
};
use serde::Serialize;

const TOP_GENRES: usize = 5;
const TOP_CATEGORIES: usize = 4;
const UNCATEGORIZED: &str = "unknown";

/// Horror sub-genre tags carried by history items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Gory,
    Creepy,
    Mysterious,
    Jumpscare,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Gory,
            Category::Creepy,
            Category::Mysterious,
            Category::Jumpscare,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Gory => "gory",
            Category::Creepy => "creepy",
            Category::Mysterious => "mysterious",
            Category::Jumpscare => "jumpscare",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Gory => "Blood, violence, and brutal visuals",
            Category::Creepy => "Psychologically unsettling and disturbing",
            Category::Mysterious => "Puzzles, investigations, and hidden secrets",
            Category::Jumpscare => "Sudden scares and paranormal frights",
        }
    }

    /// Case-insensitive parse
    pub fn parse(label: &str) -> AppResult<Category> {
        let label = label.trim();
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(label))
            .ok_or_else(|| {
                let valid: Vec<&str> = Category::all().iter().map(Category::as_str).collect();
                AppError::InvalidInput(format!(
                    "Invalid category. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryPreference {
    pub category: String,
    pub count: usize,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategorySummary {
    pub name: String,
    pub count: usize,
    pub description: String,
}

/// Aggregate view of a user's watch history
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserStats {
    pub total_movies: usize,
    pub rated_movies: usize,
    pub unrated_movies: usize,
    pub average_rating: f64,
    pub top_genres: Vec<GenreCount>,
    pub category_preferences: Vec<CategoryPreference>,
}

/// Counts by key in first-seen order
fn tally<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(&'a str, Vec<usize>)> {
    let mut tallies: Vec<(&str, Vec<usize>)> = Vec::new();
    for (index, key) in keys.enumerate() {
        match tallies.iter_mut().find(|(k, _)| *k == key) {
            Some((_, hits)) => hits.push(index),
            None => tallies.push((key, vec![index])),
        }
    }
    tallies
}

/// Computes statistics over the rated part of the history
pub fn user_stats(items: &[HistoryItem]) -> UserStats {
    let rated: Vec<&HistoryItem> = items.iter().filter(|i| i.is_rated()).collect();
    let ratings: Vec<f64> = rated.iter().filter_map(|i| i.rating).collect();

    let average_rating = if ratings.is_empty() {
        0.0
    } else {
        round_to_tenth(ratings.iter().sum::<f64>() / ratings.len() as f64)
    };

    let mut top_genres: Vec<GenreCount> =
        tally(rated.iter().copied().flat_map(|i| i.genres.iter().map(String::as_str)))
            .into_iter()
            .map(|(genre, hits)| GenreCount {
                genre: genre.to_string(),
                count: hits.len(),
            })
            .collect();
    top_genres.sort_by(|a, b| b.count.cmp(&a.count));
    top_genres.truncate(TOP_GENRES);

    let mut category_preferences: Vec<CategoryPreference> = tally(
        rated
            .iter()
            .copied()
            .map(|i| i.category.as_deref().unwrap_or(UNCATEGORIZED)),
    )
    .into_iter()
    .map(|(category, hits)| {
        let total: f64 = hits.iter().map(|&idx| ratings[idx]).sum();
        CategoryPreference {
            category: category.to_string(),
            count: hits.len(),
            avg_rating: round_to_tenth(total / hits.len() as f64),
        }
    })
    .collect();
    category_preferences.sort_by(|a, b| b.avg_rating.total_cmp(&a.avg_rating));
    category_preferences.truncate(TOP_CATEGORIES);

    UserStats {
        total_movies: items.len(),
        rated_movies: rated.len(),
        unrated_movies: items.len() - rated.len(),
        average_rating,
        top_genres,
        category_preferences,
    }
}

/// History items tagged with `label`
pub fn items_in_category(items: &[HistoryItem], label: &str) -> AppResult<Vec<HistoryItem>> {
    let category = Category::parse(label)?;
    Ok(items
        .iter()
        .filter(|i| {
            i.category
                .as_deref()
                .is_some_and(|c| c.trim().eq_ignore_ascii_case(category.as_str()))
        })
        .cloned()
        .collect())
}

/// Counts per category present in the history; untagged items are left out
pub fn category_summaries(items: &[HistoryItem]) -> Vec<CategorySummary> {
    tally(items.iter().filter_map(|i| i.category.as_deref()))
        .into_iter()
        .filter_map(|(label, hits)| {
            Category::parse(label).ok().map(|category| CategorySummary {
                name: category.as_str().to_string(),
                count: hits.len(),
                description: category.description().to_string(),
            })
        })
        .collect()
}
