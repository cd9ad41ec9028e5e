use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::HistoryStore,
    error::AppResult,
    models::{normalize_title, HistoryItem},
};

/// Creates a PostgreSQL connection pool and applies pending migrations
pub async fn create_pool(database_url: &str) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(sqlx::Error::from)?;

    Ok(pool)
}

/// Row shape of `user_movies`
#[derive(Debug, sqlx::FromRow)]
struct HistoryRow {
    title: String,
    year: String,
    rating: Option<f64>,
    genres: Vec<String>,
    horror_category: Option<String>,
    overview: String,
    vote_average: f64,
    poster_path: Option<String>,
}

impl From<HistoryRow> for HistoryItem {
    fn from(row: HistoryRow) -> Self {
        HistoryItem {
            title: row.title,
            year: row.year,
            rating: row.rating,
            genres: row.genres,
            category: row.horror_category,
            overview: row.overview,
            external_score: row.vote_average,
            poster_ref: row.poster_path,
        }
    }
}

/// History stored in PostgreSQL, one row per (user, title)
#[derive(Clone)]
pub struct PgHistoryStore {
    pool: PgPool,
    user_id: String,
}

impl PgHistoryStore {
    pub fn new(pool: PgPool, user_id: String) -> Self {
        Self { pool, user_id }
    }

    /// Inserts items that are not stored yet; existing rows are left untouched
    ///
    /// Returns the number of rows inserted.
    pub async fn seed(&self, items: &[HistoryItem]) -> AppResult<u64> {
        let now = Utc::now();
        let mut inserted = 0;

        for item in items {
            let result = sqlx::query(
                r#"
                INSERT INTO user_movies
                    (user_id, title, title_key, year, rating, genres, horror_category,
                     overview, vote_average, poster_path, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
                ON CONFLICT (user_id, title_key) DO NOTHING
                "#,
            )
            .bind(&self.user_id)
            .bind(&item.title)
            .bind(item.dedup_key())
            .bind(&item.year)
            .bind(item.rating)
            .bind(&item.genres)
            .bind(&item.category)
            .bind(&item.overview)
            .bind(item.external_score)
            .bind(&item.poster_ref)
            .bind(now)
            .execute(&self.pool)
            .await?;

            inserted += result.rows_affected();
        }

        tracing::info!(
            user_id = %self.user_id,
            inserted = inserted,
            "Seeded watch history"
        );

        Ok(inserted)
    }

    async fn update_rating(&self, title: &str, rating: Option<f64>) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE user_movies
            SET rating = $1, updated_at = $2
            WHERE user_id = $3 AND title_key = $4
            "#,
        )
        .bind(rating)
        .bind(Utc::now())
        .bind(&self.user_id)
        .bind(normalize_title(title))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl HistoryStore for PgHistoryStore {
    async fn all_items(&self) -> AppResult<Vec<HistoryItem>> {
        let rows: Vec<HistoryRow> = sqlx::query_as(
            r#"
            SELECT title, year, rating, genres, horror_category,
                   overview, vote_average, poster_path
            FROM user_movies
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(&self.user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(HistoryItem::from).collect())
    }

    async fn set_rating(&self, title: &str, rating: f64) -> AppResult<bool> {
        self.update_rating(title, Some(rating)).await
    }

    async fn clear_rating(&self, title: &str) -> AppResult<bool> {
        self.update_rating(title, None).await
    }
}
