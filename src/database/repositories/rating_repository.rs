// ABOUTME: SQLite-backed rating store with a single-query batched lookup
// ABOUTME: Builds one IN (...) clause per batch so summaries cost one round trip
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::Utc;
use pantry_core::errors::StoreError;
use pantry_core::models::{NewRating, Rating, RatingId, RecipeId, Score};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};

use super::recipe_repository::parse_timestamp;
use super::RatingStore;

/// Rating store over a `SQLite` pool
#[derive(Clone)]
pub struct SqliteRatingStore {
    pool: SqlitePool,
}

impl SqliteRatingStore {
    /// Create a store over an already migrated pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingStore for SqliteRatingStore {
    async fn list_for_recipes(&self, recipe_ids: &[RecipeId]) -> Result<Vec<Rating>, StoreError> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, user_id, recipe_id, score, comment, created_at FROM ratings WHERE recipe_id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in recipe_ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_rating).collect()
    }

    async fn list_for_recipe(&self, recipe_id: RecipeId) -> Result<Vec<Rating>, StoreError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, recipe_id, score, comment, created_at
            FROM ratings
            WHERE recipe_id = $1
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_rating).collect()
    }

    async fn insert(&self, rating: NewRating) -> Result<Rating, StoreError> {
        let now = Utc::now();
        let id = RatingId::new();

        sqlx::query(
            r"
            INSERT INTO ratings (id, user_id, recipe_id, score, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(id.to_string())
        .bind(rating.user_id.to_string())
        .bind(rating.recipe_id.to_string())
        .bind(i64::from(rating.score.value()))
        .bind(&rating.comment)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(Rating {
            id,
            user_id: rating.user_id,
            recipe_id: rating.recipe_id,
            score: rating.score,
            comment: rating.comment,
            created_at: now,
        })
    }
}

fn decode_error(reason: impl ToString) -> StoreError {
    StoreError::Serialization {
        entity: "rating",
        reason: reason.to_string(),
    }
}

/// Convert a database row to a `Rating`
fn row_to_rating(row: &SqliteRow) -> Result<Rating, StoreError> {
    let id_str: String = row.try_get("id")?;
    let user_id_str: String = row.try_get("user_id")?;
    let recipe_id_str: String = row.try_get("recipe_id")?;
    let score: i64 = row.try_get("score")?;
    let created_at_str: String = row.try_get("created_at")?;

    Ok(Rating {
        id: id_str.parse().map_err(decode_error)?,
        user_id: user_id_str.parse().map_err(decode_error)?,
        recipe_id: recipe_id_str.parse().map_err(decode_error)?,
        score: Score::try_from(score).map_err(decode_error)?,
        comment: row.try_get("comment")?,
        created_at: parse_timestamp(&created_at_str, "rating")?,
    })
}
