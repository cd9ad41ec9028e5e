use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub mod genre;

pub use genre::{genre_id, genre_name, resolve_genre_names, UNKNOWN_GENRE};

/// Dedup key for titles: trimmed and lowercased
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Dedup keys for a collection of titles
pub fn title_set<I, S>(titles: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    titles
        .into_iter()
        .map(|t| normalize_title(t.as_ref()))
        .collect()
}

/// Rounds to one decimal place, the precision ratings are reported in
///
/// Exact ties go to the even neighbour, so 8.25 becomes 8.2.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// A movie the user has already watched, optionally rated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryItem {
    pub title: String,
    pub year: String,
    /// User rating in [1, 10]; `None` means unrated
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Classification tag such as "gory" or "creepy"
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub overview: String,
    /// The catalog's own aggregate rating
    #[serde(default)]
    pub external_score: f64,
    #[serde(default)]
    pub poster_ref: Option<String>,
}

impl HistoryItem {
    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }

    pub fn dedup_key(&self) -> String {
        normalize_title(&self.title)
    }
}

/// Catalog sort orders understood by the discover endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    PopularityDesc,
    VoteAverageDesc,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::PopularityDesc => "popularity.desc",
            SortBy::VoteAverageDesc => "vote_average.desc",
        }
    }
}

/// Filter for a catalog discover call
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverQuery {
    pub genre_ids: Vec<u64>,
    pub page: u32,
    pub sort_by: SortBy,
    pub min_score: Option<f64>,
    pub min_vote_count: Option<u32>,
}

/// A movie as returned by the external catalog
///
/// Lives only for the duration of one engine call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogCandidate {
    pub id: u64,
    pub title: String,
    /// `YYYY-MM-DD`; may be empty
    pub release_date: String,
    pub genre_ids: Vec<u64>,
    pub external_score: f64,
    pub popularity: f64,
    pub overview: String,
    pub poster_ref: Option<String>,
}

impl CatalogCandidate {
    /// Release year, the first four characters of the release date
    pub fn year(&self) -> &str {
        self.release_date
            .get(..4)
            .unwrap_or(self.release_date.as_str())
    }

    pub fn dedup_key(&self) -> String {
        normalize_title(&self.title)
    }

    pub fn has_any_genre(&self, genre_ids: &[u64]) -> bool {
        self.genre_ids.iter().any(|id| genre_ids.contains(id))
    }
}

/// A recommended movie returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    pub title: String,
    pub year: String,
    pub genres: Vec<String>,
    pub overview: String,
    pub external_score: f64,
    pub popularity: f64,
    pub poster_ref: Option<String>,
    pub similarity_score: Option<f64>,
}

impl From<CatalogCandidate> for RecommendationResult {
    fn from(candidate: CatalogCandidate) -> Self {
        RecommendationResult {
            year: candidate.year().to_string(),
            genres: resolve_genre_names(&candidate.genre_ids),
            title: candidate.title,
            overview: candidate.overview,
            external_score: candidate.external_score,
            popularity: candidate.popularity,
            poster_ref: candidate.poster_ref,
            similarity_score: None,
        }
    }
}

/// Estimated rating for one unrated history item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub title: String,
    pub year: String,
    /// Rounded to one decimal
    pub predicted_rating: f64,
    /// Heuristic in [0, 1]
    pub confidence: f64,
    pub actual_external_score: f64,
    pub genres: Vec<String>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Movie object as it appears in TMDB list responses
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Paged list envelope shared by search, recommendations, similar and discover
#[derive(Debug, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

impl From<TmdbMovie> for CatalogCandidate {
    fn from(movie: TmdbMovie) -> Self {
        CatalogCandidate {
            id: movie.id,
            title: movie.title,
            release_date: movie.release_date.unwrap_or_default(),
            genre_ids: movie.genre_ids,
            external_score: movie.vote_average,
            popularity: movie.popularity,
            overview: movie.overview.unwrap_or_default(),
            poster_ref: movie.poster_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, release_date: &str) -> CatalogCandidate {
        CatalogCandidate {
            id: 1,
            title: title.to_string(),
            release_date: release_date.to_string(),
            genre_ids: vec![27, 53],
            external_score: 7.1,
            popularity: 40.0,
            overview: String::new(),
            poster_ref: None,
        }
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  The Wailing "), "the wailing");
        assert_eq!(normalize_title("IT"), normalize_title("it"));
    }

    #[test]
    fn test_title_set_normalizes() {
        let set = title_set(["Smile ", "SMILE", "Cobweb"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("smile"));
        assert!(set.contains("cobweb"));
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(7.0), 7.0);
        assert_eq!(round_to_tenth(8.333333), 8.3);
        assert_eq!(round_to_tenth(7.96), 8.0);
        assert_eq!(round_to_tenth(8.25), 8.2);
        assert_eq!(round_to_tenth(8.75), 8.8);
    }

    #[test]
    fn test_candidate_year() {
        assert_eq!(candidate("Smile", "2022-09-23").year(), "2022");
        assert_eq!(candidate("Smile", "").year(), "");
        assert_eq!(candidate("Smile", "20").year(), "20");
    }

    #[test]
    fn test_candidate_has_any_genre() {
        let c = candidate("Smile", "2022-09-23");
        assert!(c.has_any_genre(&[53]));
        assert!(!c.has_any_genre(&[18, 35]));
        assert!(!c.has_any_genre(&[]));
    }

    #[test]
    fn test_sort_by_as_str() {
        assert_eq!(SortBy::PopularityDesc.as_str(), "popularity.desc");
        assert_eq!(SortBy::VoteAverageDesc.as_str(), "vote_average.desc");
    }

    #[test]
    fn test_tmdb_movie_deserialization_with_missing_fields() {
        let json = r#"{
            "id": 493922,
            "title": "Hereditary",
            "release_date": "2018-06-07",
            "genre_ids": [27, 9648, 53],
            "vote_average": 7.3
        }"#;

        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        let candidate: CatalogCandidate = movie.into();
        assert_eq!(candidate.id, 493922);
        assert_eq!(candidate.year(), "2018");
        assert_eq!(candidate.overview, "");
        assert_eq!(candidate.popularity, 0.0);
        assert_eq!(candidate.poster_ref, None);
    }

    #[test]
    fn test_recommendation_from_candidate_resolves_genres() {
        let result = RecommendationResult::from(candidate("Smile", "2022-09-23"));
        assert_eq!(result.year, "2022");
        assert_eq!(result.genres, vec!["Horror", "Thriller"]);
        assert_eq!(result.similarity_score, None);
    }

    #[test]
    fn test_history_item_deserializes_unrated() {
        let json = r#"{ "title": "Cobweb", "year": "2023", "genres": ["Horror", "Mystery"] }"#;
        let item: HistoryItem = serde_json::from_str(json).unwrap();
        assert!(!item.is_rated());
        assert_eq!(item.dedup_key(), "cobweb");
        assert_eq!(item.external_score, 0.0);
    }
}
