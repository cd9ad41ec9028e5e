use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use movie_recs_api::{
    db::InMemoryHistoryStore,
    error::{AppError, AppResult},
    models::{CatalogCandidate, DiscoverQuery},
    routes::{create_router, AppState},
    services::providers::CatalogClient,
};

/// Catalog double returning canned results, or failing everything
struct FakeCatalog {
    offline: bool,
}

fn candidate(
    id: u64,
    title: &str,
    genre_ids: &[u64],
    score: f64,
    overview: &str,
) -> CatalogCandidate {
    CatalogCandidate {
        id,
        title: title.to_string(),
        release_date: "2019-10-01".to_string(),
        genre_ids: genre_ids.to_vec(),
        external_score: score,
        popularity: 50.0,
        overview: overview.to_string(),
        poster_ref: None,
    }
}

impl FakeCatalog {
    fn check(&self) -> AppResult<()> {
        if self.offline {
            return Err(AppError::ExternalApi("catalog offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CatalogClient for FakeCatalog {
    async fn search(&self, title: &str, _year: Option<i32>) -> AppResult<Vec<CatalogCandidate>> {
        self.check()?;
        Ok(vec![candidate(1, title, &[27], 7.0, "")])
    }

    async fn recommendations_for(
        &self,
        id: u64,
        _limit: usize,
    ) -> AppResult<Vec<CatalogCandidate>> {
        self.check()?;
        Ok(vec![
            candidate(100 + id, "Sinister", &[27, 53], 6.7, "A writer finds home movies."),
            candidate(200, "Paddington", &[35, 10751], 7.2, "A bear in London."),
            candidate(201, "Hereditary", &[27], 7.3, "A grieving family."),
        ])
    }

    async fn similar_to(&self, _id: u64, _limit: usize) -> AppResult<Vec<CatalogCandidate>> {
        self.check()?;
        Ok(vec![candidate(300, "The Babadook", &[27, 18], 6.5, "A mother and son.")])
    }

    async fn discover(&self, query: &DiscoverQuery) -> AppResult<Vec<CatalogCandidate>> {
        self.check()?;
        if query.page > 1 {
            return Ok(Vec::new());
        }
        Ok(vec![
            candidate(400, "Terrifier", &[27], 6.4, "A killer clown leaves blood and gore."),
            candidate(401, "Seven", &[80, 53], 8.4, "Two detectives, seven sins."),
            candidate(402, "The Ritual", &[27], 6.3, "Friends lost in a forest."),
        ])
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

fn create_test_server_with(catalog: FakeCatalog) -> TestServer {
    let state = AppState::new(
        Arc::new(InMemoryHistoryStore::with_sample_data()),
        Arc::new(catalog),
        vec![27, 53, 9648],
        vec![27],
    );
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn create_test_server() -> TestServer {
    create_test_server_with(FakeCatalog { offline: false })
}

fn titles(values: &[Value]) -> Vec<&str> {
    values.iter().filter_map(|v| v["title"].as_str()).collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_list_watched() {
    let server = create_test_server();
    let response = server.get("/api/movies/watched").await;
    response.assert_status_ok();

    let items: Vec<Value> = response.json();
    assert_eq!(items.len(), 9);
    assert_eq!(items[0]["title"], "Copycat");
}

#[tokio::test]
async fn test_rate_then_clear() {
    let server = create_test_server();

    let response = server
        .put("/api/movies/watched/cobweb/rating")
        .json(&json!({ "rating": 6.5 }))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let items: Vec<Value> = server.get("/api/movies/watched").await.json();
    let cobweb = items.iter().find(|i| i["title"] == "Cobweb").unwrap();
    assert_eq!(cobweb["rating"], 6.5);

    let response = server.delete("/api/movies/watched/Cobweb/rating").await;
    response.assert_status(StatusCode::NO_CONTENT);

    let items: Vec<Value> = server.get("/api/movies/watched").await.json();
    let cobweb = items.iter().find(|i| i["title"] == "Cobweb").unwrap();
    assert!(cobweb["rating"].is_null());
}

#[tokio::test]
async fn test_rate_rejects_out_of_range() {
    let server = create_test_server();
    let response = server
        .put("/api/movies/watched/Cobweb/rating")
        .json(&json!({ "rating": 11.0 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rate_unknown_title_is_not_found() {
    let server = create_test_server();
    let response = server
        .put("/api/movies/watched/Paddington/rating")
        .json(&json!({ "rating": 7.0 }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_recommendations_filter_genre_and_dedup() {
    let server = create_test_server();
    let response = server.get("/api/movies/recommendations").await;
    response.assert_status_ok();

    let recs: Vec<Value> = response.json();
    let names = titles(&recs);
    assert!(names.contains(&"The Babadook"));
    assert!(!names.contains(&"Paddington"));
    assert!(names.contains(&"Hereditary"));

    let mut unique = names.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), names.len());
}

#[tokio::test]
async fn test_recommendations_limit_validated() {
    let server = create_test_server();
    server
        .get("/api/movies/recommendations")
        .add_query_param("limit", 0)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .get("/api/movies/recommendations")
        .add_query_param("limit", 1)
        .await;
    response.assert_status_ok();
    let recs: Vec<Value> = response.json();
    assert_eq!(recs.len(), 1);
}

#[tokio::test]
async fn test_recommendations_empty_when_catalog_offline() {
    let server = create_test_server_with(FakeCatalog { offline: true });
    let response = server.get("/api/movies/recommendations").await;
    response.assert_status_ok();
    response.assert_json(&json!([]));
}

#[tokio::test]
async fn test_predictions_cover_unrated_sorted() {
    let server = create_test_server();
    let response = server.get("/api/movies/predictions").await;
    response.assert_status_ok();

    let predictions: Vec<Value> = response.json();
    assert_eq!(predictions.len(), 3);

    let ratings: Vec<f64> = predictions
        .iter()
        .map(|p| p["predicted_rating"].as_f64().unwrap())
        .collect();
    assert!(ratings.windows(2).all(|w| w[0] >= w[1]));
    assert!(ratings.iter().all(|r| (1.0..=10.0).contains(r)));
}

#[tokio::test]
async fn test_stats() {
    let server = create_test_server();
    let response = server.get("/api/movies/stats").await;
    response.assert_status_ok();

    let stats: Value = response.json();
    assert_eq!(stats["total_movies"], 9);
    assert_eq!(stats["rated_movies"], 6);
    assert_eq!(stats["unrated_movies"], 3);
    assert_eq!(stats["top_genres"][0]["genre"], "Horror");
    assert_eq!(stats["top_genres"][0]["count"], 6);
}

#[tokio::test]
async fn test_categories_and_by_category() {
    let server = create_test_server();

    let response = server.get("/api/movies/categories").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(!body["categories"].as_array().unwrap().is_empty());

    let response = server.get("/api/movies/by-category/creepy").await;
    response.assert_status_ok();
    let items: Vec<Value> = response.json();
    assert!(titles(&items).contains(&"Cobweb"));

    server
        .get("/api/movies/by-category/cozy")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_random_excludes_watched() {
    let server = create_test_server();
    let response = server.get("/api/movies/random").await;
    response.assert_status_ok();

    let movies: Vec<Value> = response.json();
    let mut names = titles(&movies);
    names.sort();
    assert_eq!(names, vec!["Terrifier", "The Ritual"]);
}

#[tokio::test]
async fn test_moods_listed() {
    let server = create_test_server();
    let response = server.get("/api/movies/moods").await;
    response.assert_status_ok();

    let moods: Vec<Value> = response.json();
    assert_eq!(moods.len(), 6);
    assert_eq!(moods[0]["name"], "gory");
}

#[tokio::test]
async fn test_roulette_spin() {
    let server = create_test_server();
    let response = server.get("/api/movies/roulette/gory").await;
    response.assert_status_ok();

    let pick: Value = response.json();
    assert_eq!(pick["mood"], "gory");
    assert_eq!(pick["movie"]["title"], "Terrifier");
    assert!(pick["mood_score"].as_u64().unwrap() >= 1);
}

#[tokio::test]
async fn test_roulette_not_found_when_catalog_offline() {
    let server = create_test_server_with(FakeCatalog { offline: true });
    server
        .get("/api/movies/roulette/creepy")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
