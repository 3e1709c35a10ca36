// ABOUTME: SQLite-backed favorite store keyed on the (user, recipe) pair
// ABOUTME: Adds are idempotent through INSERT OR IGNORE on the composite primary key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::Utc;
use pantry_core::errors::StoreError;
use pantry_core::models::{Favorite, RecipeId, UserId};
use sqlx::{Row, SqlitePool};

use super::recipe_repository::parse_timestamp;
use super::FavoriteStore;

/// Favorite store over a `SQLite` pool
#[derive(Clone)]
pub struct SqliteFavoriteStore {
    pool: SqlitePool,
}

impl SqliteFavoriteStore {
    /// Create a store over an already migrated pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteStore for SqliteFavoriteStore {
    async fn add(&self, user_id: UserId, recipe_id: RecipeId) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r"
            INSERT OR IGNORE INTO favorites (user_id, recipe_id, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_id.to_string())
        .bind(recipe_id.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, user_id: UserId, recipe_id: RecipeId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id.to_string())
            .bind(recipe_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Favorite>, StoreError> {
        let rows = sqlx::query(
            r"
            SELECT user_id, recipe_id, created_at
            FROM favorites
            WHERE user_id = $1
            ORDER BY rowid
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<Favorite, StoreError> {
                let recipe_id_str: String = row.try_get("recipe_id")?;
                let created_at_str: String = row.try_get("created_at")?;
                Ok(Favorite {
                    user_id,
                    recipe_id: recipe_id_str.parse().map_err(|e: uuid::Error| {
                        StoreError::Serialization {
                            entity: "favorite",
                            reason: e.to_string(),
                        }
                    })?,
                    created_at: parse_timestamp(&created_at_str, "favorite")?,
                })
            })
            .collect()
    }
}
