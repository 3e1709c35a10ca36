// ABOUTME: SQLite-backed recipe store with soft-delete flag and JSON ingredient column
// ABOUTME: Natural order is the autoincrement sequence column, so listings are insertion ordered
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pantry_core::errors::StoreError;
use pantry_core::models::{
    Ingredients, LifecycleState, NewRecipe, Recipe, RecipeId, RecipePatch, RecipeTitle,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;

use super::{PurgeOutcome, RecipeFilter, RecipeStore};

const SELECT_COLUMNS: &str = r"
    SELECT id, title, description, thumbnail, source_url, ingredients,
           is_trashed, created_at, updated_at
    FROM recipes
";

const RETURNING_COLUMNS: &str = "id, title, description, thumbnail, source_url, ingredients, \
     is_trashed, created_at, updated_at";

/// Recipe store over a `SQLite` pool
#[derive(Clone)]
pub struct SqliteRecipeStore {
    pool: SqlitePool,
}

impl SqliteRecipeStore {
    /// Create a store over an already migrated pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeStore for SqliteRecipeStore {
    async fn get(&self, id: RecipeId) -> Result<Option<Recipe>, StoreError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_recipe(&r)).transpose()
    }

    async fn list_where(&self, filter: RecipeFilter) -> Result<Vec<Recipe>, StoreError> {
        let rows = match filter {
            RecipeFilter::All => {
                sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY seq"))
                    .fetch_all(&self.pool)
                    .await?
            }
            RecipeFilter::InState(LifecycleState::Purged) => return Ok(Vec::new()),
            RecipeFilter::InState(state) => {
                sqlx::query(&format!(
                    "{SELECT_COLUMNS} WHERE is_trashed = $1 ORDER BY seq"
                ))
                .bind(state.is_trashed_flag())
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(row_to_recipe).collect()
    }

    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let now = Utc::now();
        let id = RecipeId::new();
        let ingredients_json = encode_ingredients(&recipe.ingredients)?;

        sqlx::query(
            r"
            INSERT INTO recipes (
                id, title, description, thumbnail, source_url, ingredients,
                is_trashed, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $7)
            ",
        )
        .bind(id.to_string())
        .bind(recipe.title.as_str())
        .bind(&recipe.description)
        .bind(&recipe.thumbnail)
        .bind(&recipe.source_url)
        .bind(&ingredients_json)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(Recipe {
            id,
            title: recipe.title.into_inner(),
            description: recipe.description,
            thumbnail: recipe.thumbnail,
            source_url: recipe.source_url,
            ingredients: recipe.ingredients,
            state: LifecycleState::Active,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(
        &self,
        id: RecipeId,
        patch: RecipePatch,
    ) -> Result<Option<Recipe>, StoreError> {
        let fields = &patch.fields;
        let ingredients_json = fields
            .ingredients
            .as_ref()
            .map(encode_ingredients)
            .transpose()?;

        // Single statement so concurrent writers serialize on the write lock
        let row = sqlx::query(&format!(
            r"
            UPDATE recipes SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                thumbnail = CASE WHEN $3 THEN $4 ELSE thumbnail END,
                source_url = CASE WHEN $5 THEN $6 ELSE source_url END,
                ingredients = COALESCE($7, ingredients),
                is_trashed = COALESCE($8, is_trashed),
                updated_at = $9
            WHERE id = $10
            RETURNING {RETURNING_COLUMNS}
            "
        ))
        .bind(fields.title.as_ref().map(RecipeTitle::as_str))
        .bind(fields.description.as_deref())
        .bind(fields.thumbnail.is_some())
        .bind(fields.thumbnail.clone().flatten())
        .bind(fields.source_url.is_some())
        .bind(fields.source_url.clone().flatten())
        .bind(ingredients_json)
        .bind(patch.state.map(LifecycleState::is_trashed_flag))
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let recipe = row_to_recipe(&row)?;
        debug!(recipe_id = %id, state = %recipe.state, "Updated recipe");
        Ok(Some(recipe))
    }

    async fn delete_trashed(&self, id: RecipeId) -> Result<PurgeOutcome, StoreError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND is_trashed = 1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() > 0 {
            return Ok(PurgeOutcome::Purged);
        }

        let exists = sqlx::query("SELECT 1 FROM recipes WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?
            .is_some();
        Ok(if exists {
            PurgeOutcome::NotTrashed
        } else {
            PurgeOutcome::Missing
        })
    }
}

fn encode_ingredients(ingredients: &Ingredients) -> Result<String, StoreError> {
    serde_json::to_string(ingredients).map_err(|e| StoreError::Serialization {
        entity: "recipe",
        reason: e.to_string(),
    })
}

fn decode_error(reason: impl ToString) -> StoreError {
    StoreError::Serialization {
        entity: "recipe",
        reason: reason.to_string(),
    }
}

pub(super) fn parse_timestamp(raw: &str, entity: &'static str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Serialization {
            entity,
            reason: format!("Invalid datetime: {e}"),
        })
}

/// Convert a database row to a `Recipe`
fn row_to_recipe(row: &SqliteRow) -> Result<Recipe, StoreError> {
    let id_str: String = row.try_get("id")?;
    let ingredients_json: String = row.try_get("ingredients")?;
    let is_trashed: bool = row.try_get("is_trashed")?;
    let created_at_str: String = row.try_get("created_at")?;
    let updated_at_str: String = row.try_get("updated_at")?;

    Ok(Recipe {
        id: id_str.parse().map_err(decode_error)?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        thumbnail: row.try_get("thumbnail")?,
        source_url: row.try_get("source_url")?,
        ingredients: serde_json::from_str(&ingredients_json).map_err(decode_error)?,
        state: LifecycleState::from_trashed_flag(is_trashed),
        created_at: parse_timestamp(&created_at_str, "recipe")?,
        updated_at: parse_timestamp(&updated_at_str, "recipe")?,
    })
}
