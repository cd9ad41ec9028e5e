//! TMDB (The Movie Database) catalog provider
//!
//! API Flow:
//! 1. Seed lookup: /search/movie → candidate ids
//! 2. Expansion: /movie/{id}/recommendations and /movie/{id}/similar
//! 3. Random and mood picks: /discover/movie with genre and vote filters
//!
//! Every request carries the `api_key` query parameter.

use crate::{
    error::{AppError, AppResult},
    models::{CatalogCandidate, DiscoverQuery, TmdbPage},
    services::providers::CatalogClient,
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbClient {
    /// Creates a new TMDB client
    ///
    /// Fails with a configuration error when the key is blank, since no
    /// catalog call could succeed without it.
    pub fn new(api_key: String, api_url: String) -> AppResult<Self> {
        if api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "TMDB API key is required".to_string(),
            ));
        }

        Ok(Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Performs a GET and decodes the paged result list
    async fn get_page(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> AppResult<Vec<CatalogCandidate>> {
        let url = format!("{}{}", self.api_url, endpoint);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                endpoint = %endpoint,
                status = %status,
                body = %body,
                "TMDB request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        let page: TmdbPage = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                endpoint = %endpoint,
                "Failed to deserialize TMDB response"
            );
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })?;

        Ok(page.results.into_iter().map(CatalogCandidate::from).collect())
    }
}

#[async_trait::async_trait]
impl CatalogClient for TmdbClient {
    async fn search(&self, title: &str, year: Option<i32>) -> AppResult<Vec<CatalogCandidate>> {
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let mut params = vec![("query", title.to_string())];
        if let Some(year) = year {
            params.push(("year", year.to_string()));
        }

        let results = self.get_page("/search/movie", &params).await?;

        tracing::debug!(
            query = %title,
            results = results.len(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(results)
    }

    async fn recommendations_for(
        &self,
        id: u64,
        limit: usize,
    ) -> AppResult<Vec<CatalogCandidate>> {
        let endpoint = format!("/movie/{}/recommendations", id);
        let mut results = self.get_page(&endpoint, &[("page", "1".to_string())]).await?;
        results.truncate(limit);
        Ok(results)
    }

    async fn similar_to(&self, id: u64, limit: usize) -> AppResult<Vec<CatalogCandidate>> {
        let endpoint = format!("/movie/{}/similar", id);
        let mut results = self.get_page(&endpoint, &[("page", "1".to_string())]).await?;
        results.truncate(limit);
        Ok(results)
    }

    async fn discover(&self, query: &DiscoverQuery) -> AppResult<Vec<CatalogCandidate>> {
        let genres = query
            .genre_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join("|"); // `|` = any of, `,` would require all

        let mut params = vec![
            ("with_genres", genres),
            ("page", query.page.to_string()),
            ("sort_by", query.sort_by.as_str().to_string()),
        ];
        if let Some(min_score) = query.min_score {
            params.push(("vote_average.gte", min_score.to_string()));
        }
        if let Some(min_votes) = query.min_vote_count {
            params.push(("vote_count.gte", min_votes.to_string()));
        }

        let results = self.get_page("/discover/movie", &params).await?;

        tracing::debug!(
            page = query.page,
            results = results.len(),
            provider = "tmdb",
            "Discover page fetched"
        );

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
