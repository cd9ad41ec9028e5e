use crate::{
    models::{title_set, CatalogCandidate, DiscoverQuery, SortBy},
    services::providers::CatalogClient,
};
use rand::{seq::SliceRandom, Rng};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

const PAGES_TO_SEARCH: u32 = 3;
const MIN_SCORE: f64 = 5.5;
const MIN_VOTE_COUNT: u32 = 100;
/// Candidates without keyword hits still qualify at or above this score
const HIGH_SCORE: f64 = 7.0;
const MIN_SHORTLIST: usize = 5;

/// Emotional tone a roulette spin is tuned for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mood {
    Gory,
    Creepy,
    Mysterious,
    Jumpscare,
    BodyHorror,
    Paranoid,
}

/// Catalog query and scoring setup for a mood
#[derive(Debug)]
pub struct MoodConfig {
    pub keywords: &'static [&'static str],
    pub genre_ids: &'static [u64],
    pub sort_by: SortBy,
}

// Genres overlap across moods on purpose; keywords are what tell them apart.
const GORY: MoodConfig = MoodConfig {
    keywords: &["blood", "gore", "violent", "brutal", "slasher", "torture"],
    genre_ids: &[27, 53],
    sort_by: SortBy::PopularityDesc,
};
const CREEPY: MoodConfig = MoodConfig {
    keywords: &["psychological", "disturbing", "unsettling", "paranormal", "haunted"],
    genre_ids: &[27, 9648, 53],
    sort_by: SortBy::VoteAverageDesc,
};
const MYSTERIOUS: MoodConfig = MoodConfig {
    keywords: &["mystery", "puzzle", "investigation", "detective", "supernatural"],
    genre_ids: &[9648, 27, 53],
    sort_by: SortBy::VoteAverageDesc,
};
const JUMPSCARE: MoodConfig = MoodConfig {
    keywords: &["jump scare", "sudden", "startling", "scary", "frightening"],
    genre_ids: &[27, 53],
    sort_by: SortBy::PopularityDesc,
};
const BODY_HORROR: MoodConfig = MoodConfig {
    keywords: &[
        "body horror",
        "transformation",
        "mutation",
        "grotesque",
        "flesh",
        "visceral",
        "anatomical",
    ],
    genre_ids: &[27, 878, 53],
    sort_by: SortBy::VoteAverageDesc,
};
const PARANOID: MoodConfig = MoodConfig {
    keywords: &[
        "paranoid",
        "conspiracy",
        "surveillance",
        "persecution",
        "madness",
        "delusion",
        "reality",
    ],
    genre_ids: &[27, 53, 9648],
    sort_by: SortBy::VoteAverageDesc,
};

impl Mood {
    /// Mood used for labels that match nothing
    pub const DEFAULT: Mood = Mood::Gory;

    pub fn all() -> &'static [Mood] {
        &[
            Mood::Gory,
            Mood::Creepy,
            Mood::Mysterious,
            Mood::Jumpscare,
            Mood::BodyHorror,
            Mood::Paranoid,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Gory => "gory",
            Mood::Creepy => "creepy",
            Mood::Mysterious => "mysterious",
            Mood::Jumpscare => "jumpscare",
            Mood::BodyHorror => "body-horror",
            Mood::Paranoid => "paranoid",
        }
    }

    /// Case-insensitive lookup; unknown labels give [`Mood::DEFAULT`]
    pub fn from_label(label: &str) -> Mood {
        let label = label.trim();
        Mood::all()
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(label))
            .unwrap_or(Mood::DEFAULT)
    }

    pub fn config(&self) -> &'static MoodConfig {
        match self {
            Mood::Gory => &GORY,
            Mood::Creepy => &CREEPY,
            Mood::Mysterious => &MYSTERIOUS,
            Mood::Jumpscare => &JUMPSCARE,
            Mood::BodyHorror => &BODY_HORROR,
            Mood::Paranoid => &PARANOID,
        }
    }
}

/// Number of mood keywords occurring in an overview
pub fn keyword_score(overview: &str, keywords: &[&str]) -> usize {
    let overview = overview.to_lowercase();
    keywords
        .iter()
        .filter(|k| overview.contains(&k.to_lowercase()))
        .count()
}

/// The title a roulette spin landed on
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MoodPick {
    pub mood: Mood,
    pub mood_score: usize,
    pub candidate: CatalogCandidate,
}

/// Roulette: one random title fitting a mood
pub struct MoodSelector {
    catalog: Arc<dyn CatalogClient>,
}

impl MoodSelector {
    pub fn new(catalog: Arc<dyn CatalogClient>) -> Self {
        Self { catalog }
    }

    /// Spins for a single title matching `mood`
    ///
    /// Candidates qualify with at least one keyword hit in their overview or
    /// a high catalog score. The pool is ranked by (keyword hits, score) and
    /// the pick is drawn uniformly from the top fifth, at least five deep.
    /// Returns `None` when nothing qualifies.
    pub async fn spin_for_mood<R>(
        &self,
        mood: &str,
        exclude_titles: &HashSet<String>,
        rng: &mut R,
    ) -> Option<MoodPick>
    where
        R: Rng + ?Sized,
    {
        let mood = Mood::from_label(mood);
        let config = mood.config();
        let excluded = title_set(exclude_titles);
        let mut pool: Vec<(usize, CatalogCandidate)> = Vec::new();

        for page in 1..=PAGES_TO_SEARCH {
            let query = DiscoverQuery {
                genre_ids: config.genre_ids.to_vec(),
                page,
                sort_by: config.sort_by,
                min_score: Some(MIN_SCORE),
                min_vote_count: Some(MIN_VOTE_COUNT),
            };

            let candidates = match self.catalog.discover(&query).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    tracing::warn!(
                        mood = mood.as_str(),
                        page = page,
                        error = %e,
                        "Skipping mood page"
                    );
                    continue;
                }
            };

            for candidate in candidates {
                if excluded.contains(&candidate.dedup_key()) {
                    continue;
                }
                let score = keyword_score(&candidate.overview, config.keywords);
                if score > 0 || candidate.external_score >= HIGH_SCORE {
                    pool.push((score, candidate));
                }
            }
        }

        if pool.is_empty() {
            tracing::info!(mood = mood.as_str(), "No titles matched mood");
            return None;
        }

        pool.sort_by(|(score_a, a), (score_b, b)| {
            score_b
                .cmp(score_a)
                .then_with(|| b.external_score.total_cmp(&a.external_score))
        });

        let shortlist_len = (pool.len() / 5).max(MIN_SHORTLIST).min(pool.len());
        let (mood_score, candidate) = pool[..shortlist_len].choose(rng)?.clone();

        tracing::info!(
            mood = mood.as_str(),
            pool = pool.len(),
            shortlist = shortlist_len,
            title = %candidate.title,
            "Mood spin landed"
        );

        Some(MoodPick {
            mood,
            mood_score,
            candidate,
        })
    }
}
