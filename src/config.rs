use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// PostgreSQL connection URL. Without it the sample history is kept in memory.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Insert the bundled sample history into PostgreSQL at startup
    #[serde(default)]
    pub seed_sample_data: bool,

    /// Owner of the history rows read from PostgreSQL
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Genres a recommendation must carry at least one of
    #[serde(default = "default_recommendation_genre_ids")]
    pub recommendation_genre_ids: Vec<u64>,

    /// Genre filter used when discovering random titles
    #[serde(default = "default_discovery_genre_ids")]
    pub discovery_genre_ids: Vec<u64>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_user_id() -> String {
    "default".to_string()
}

fn default_recommendation_genre_ids() -> Vec<u64> {
    vec![27, 53, 9648] // Horror, Thriller, Mystery
}

fn default_discovery_genre_ids() -> Vec<u64> {
    vec![27]
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// A missing or blank `TMDB_API_KEY` is a configuration error; nothing
    /// downstream can run without catalog credentials.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| AppError::Configuration(format!("Failed to load config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.tmdb_api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "TMDB_API_KEY must not be empty".to_string(),
            ));
        }
        if self.recommendation_genre_ids.is_empty() {
            return Err(AppError::Configuration(
                "RECOMMENDATION_GENRE_IDS must name at least one genre".to_string(),
            ));
        }
        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
