// ABOUTME: Ingredient-overlap ranking over the active recipe partition
// ABOUTME: Keeps recipes sharing at least one ingredient, stable-sorted by match count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use pantry_core::errors::{AppError, AppResult};
use pantry_core::models::{normalize_ingredient, Recipe};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::lifecycle::LifecycleManager;

/// Normalized set of pantry ingredients to match against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientQuery {
    names: HashSet<String>,
}

impl IngredientQuery {
    /// Build a query from raw names; blanks are dropped and case is folded
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: raw
                .into_iter()
                .filter_map(|name| normalize_ingredient(name.as_ref()))
                .collect(),
        }
    }

    /// Validate an untyped request value
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` unless the value is an array of strings
    pub fn from_json(value: &Value) -> AppResult<Self> {
        let Value::Array(items) = value else {
            return Err(AppError::invalid_input("Ingredients must be an array"));
        };
        let names = items
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| AppError::invalid_input("Ingredients must be strings"))
            })
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Self::new(names))
    }

    /// Whether no usable ingredient was given
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of distinct query ingredients
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Number of query ingredients the recipe contains
    #[must_use]
    pub fn matched_count(&self, recipe: &Recipe) -> usize {
        recipe.ingredients.overlap(&self.names)
    }
}

/// A recipe paired with how many query ingredients it contains
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecipe {
    /// The matched recipe
    #[serde(flatten)]
    pub recipe: Recipe,
    /// Size of the intersection with the query, always > 0
    #[serde(rename = "matched_ingredients")]
    pub matched_count: usize,
}

/// Ranks active recipes by ingredient overlap
#[derive(Clone)]
pub struct IngredientMatcher {
    lifecycle: LifecycleManager,
}

impl IngredientMatcher {
    /// Create a matcher reading through the lifecycle manager
    #[must_use]
    pub const fn new(lifecycle: LifecycleManager) -> Self {
        Self { lifecycle }
    }

    /// Rank the active recipes sharing at least one ingredient with the query
    ///
    /// Ties keep the store's natural order. An empty query matches nothing
    /// and does not touch the store.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the active listing fails
    pub async fn rank(&self, query: &IngredientQuery) -> AppResult<Vec<RankedRecipe>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let active = self.lifecycle.list_active().await?;
        let scanned = active.len();
        let ranked = rank_recipes(active, query);
        debug!(
            query_size = query.len(),
            scanned,
            matched = ranked.len(),
            "Ranked recipes by ingredient overlap"
        );
        Ok(ranked)
    }
}

/// Score, filter and stable-sort an already materialized partition
#[must_use]
pub fn rank_recipes(recipes: Vec<Recipe>, query: &IngredientQuery) -> Vec<RankedRecipe> {
    let mut ranked: Vec<RankedRecipe> = recipes
        .into_iter()
        .filter_map(|recipe| {
            let matched_count = query.matched_count(&recipe);
            (matched_count > 0).then_some(RankedRecipe {
                recipe,
                matched_count,
            })
        })
        .collect();
    // sort_by is stable, so equal counts keep natural order
    ranked.sort_by(|a, b| b.matched_count.cmp(&a.matched_count));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_must_be_an_array_of_strings() {
        assert!(IngredientQuery::from_json(&json!("egg")).is_err());
        assert!(IngredientQuery::from_json(&json!({"egg": true})).is_err());
        assert!(IngredientQuery::from_json(&json!(["egg", 3])).is_err());

        let query = IngredientQuery::from_json(&json!(["Egg", "egg ", "Flour"])).unwrap();
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_blank_names_leave_an_empty_query() {
        assert!(IngredientQuery::new(["", "   "]).is_empty());
    }
}
