// ABOUTME: Retrieval facade composing lifecycle, matching, title search and rating aggregation
// ABOUTME: Single entry point the transport layer calls for every recipe operation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::Arc;

use pantry_core::errors::AppResult;
use pantry_core::models::{NewRecipe, RatingSummary, Recipe, RecipeEdit, RecipeId};
use pantry_core::pagination::{Page, PageRequest};
use serde::Serialize;

use super::lifecycle::LifecycleManager;
use super::matcher::{IngredientMatcher, IngredientQuery, RankedRecipe};
use super::ratings::{FetchStrategy, RatingAggregator};
use super::title_search::TitleSearch;
use crate::database::repositories::{RatingStore, RecipeStore};

/// Anything that refers to one recipe
pub trait RecipeRef {
    /// The referenced recipe id
    fn recipe_id(&self) -> RecipeId;
}

impl RecipeRef for Recipe {
    fn recipe_id(&self) -> RecipeId {
        self.id
    }
}

impl RecipeRef for RankedRecipe {
    fn recipe_id(&self) -> RecipeId {
        self.recipe.id
    }
}

/// A result item together with its rating statistics
#[derive(Debug, Clone, Serialize)]
pub struct Rated<T> {
    /// The annotated item
    #[serde(flatten)]
    pub item: T,
    /// Average score and count
    pub rating: RatingSummary,
}

/// Composes the retrieval components behind one handle
#[derive(Clone)]
pub struct RetrievalFacade {
    lifecycle: LifecycleManager,
    matcher: IngredientMatcher,
    titles: TitleSearch,
    aggregator: RatingAggregator,
}

impl RetrievalFacade {
    /// Wire the components over injected stores
    #[must_use]
    pub fn new(
        recipes: Arc<dyn RecipeStore>,
        ratings: Arc<dyn RatingStore>,
        strategy: FetchStrategy,
    ) -> Self {
        let lifecycle = LifecycleManager::new(recipes);
        Self {
            matcher: IngredientMatcher::new(lifecycle.clone()),
            titles: TitleSearch::new(lifecycle.clone()),
            aggregator: RatingAggregator::new(ratings, strategy),
            lifecycle,
        }
    }

    /// The lifecycle manager shared by every component
    #[must_use]
    pub const fn lifecycle(&self) -> &LifecycleManager {
        &self.lifecycle
    }

    /// Active recipes ranked by ingredient overlap
    ///
    /// # Errors
    ///
    /// Returns a storage error if the active listing fails
    pub async fn by_ingredients(&self, query: &IngredientQuery) -> AppResult<Vec<RankedRecipe>> {
        self.matcher.rank(query).await
    }

    /// Page through active recipes, optionally filtered by title
    ///
    /// # Errors
    ///
    /// Returns a storage error if the active listing fails
    pub async fn browse(&self, search: Option<&str>, page: PageRequest) -> AppResult<Page<Recipe>> {
        self.titles.search(search.unwrap_or_default(), page).await
    }

    /// Page through the trash, optionally narrowed by title
    ///
    /// # Errors
    ///
    /// Returns a storage error if the trashed listing fails
    pub async fn trash(&self, search: Option<&str>, page: PageRequest) -> AppResult<Page<Recipe>> {
        self.titles.search_trashed(search.unwrap_or_default(), page).await
    }

    /// Create a recipe
    ///
    /// # Errors
    ///
    /// Returns a storage error if the insert fails
    pub async fn add(&self, recipe: NewRecipe) -> AppResult<Recipe> {
        self.lifecycle.add(recipe).await
    }

    /// Fetch one recipe in either state
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown or purged ids
    pub async fn get(&self, id: RecipeId) -> AppResult<Recipe> {
        self.lifecycle.get(id).await
    }

    /// Edit fields of a recipe in either state
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids
    pub async fn edit(&self, id: RecipeId, edit: RecipeEdit) -> AppResult<Recipe> {
        self.lifecycle.edit(id, edit).await
    }

    /// Move a recipe to the trash
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids
    pub async fn delete(&self, id: RecipeId) -> AppResult<Recipe> {
        self.lifecycle.delete(id).await
    }

    /// Restore a recipe from the trash
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids
    pub async fn restore(&self, id: RecipeId) -> AppResult<Recipe> {
        self.lifecycle.restore(id).await
    }

    /// Permanently remove a trashed recipe
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for active recipes, `NotFound` for unknown ids
    pub async fn purge(&self, id: RecipeId) -> AppResult<()> {
        self.lifecycle.purge(id).await
    }

    /// Rating statistics for a set of recipe ids, total over the set
    ///
    /// # Errors
    ///
    /// Returns a storage error if fetching ratings fails
    pub async fn annotate_ratings(
        &self,
        recipe_ids: &[RecipeId],
    ) -> AppResult<HashMap<RecipeId, RatingSummary>> {
        self.aggregator.summarize(recipe_ids).await
    }

    /// Attach rating statistics to each item of a result set, keeping its order
    ///
    /// # Errors
    ///
    /// Returns a storage error if fetching ratings fails
    pub async fn with_ratings<T: RecipeRef>(&self, items: Vec<T>) -> AppResult<Vec<Rated<T>>> {
        let ids: Vec<RecipeId> = items.iter().map(RecipeRef::recipe_id).collect();
        let summaries = self.annotate_ratings(&ids).await?;
        Ok(items
            .into_iter()
            .map(|item| Rated {
                rating: summaries
                    .get(&item.recipe_id())
                    .copied()
                    .unwrap_or_default(),
                item,
            })
            .collect())
    }
}
