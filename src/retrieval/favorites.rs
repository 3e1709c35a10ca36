// ABOUTME: Per-user favorite recipes with set semantics on the (user, recipe) pair
// ABOUTME: Listings only surface favorites whose recipe is currently active
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::Arc;

use pantry_core::errors::{AppError, AppResult};
use pantry_core::models::{Recipe, RecipeId, UserId};
use pantry_core::pagination::{Page, PageRequest};
use tracing::debug;

use super::lifecycle::LifecycleManager;
use crate::database::repositories::FavoriteStore;

/// Favorites bookkeeping on top of the lifecycle manager
#[derive(Clone)]
pub struct FavoritesService {
    lifecycle: LifecycleManager,
    favorites: Arc<dyn FavoriteStore>,
}

impl FavoritesService {
    /// Create the service
    #[must_use]
    pub fn new(lifecycle: LifecycleManager, favorites: Arc<dyn FavoriteStore>) -> Self {
        Self {
            lifecycle,
            favorites,
        }
    }

    /// Favorite an active recipe; re-adding is a no-op
    ///
    /// Returns whether the pair was newly added.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the recipe is unknown or trashed
    pub async fn add(&self, user_id: UserId, recipe_id: RecipeId) -> AppResult<bool> {
        if !self.lifecycle.is_active(recipe_id).await? {
            return Err(AppError::not_found(format!("Recipe {recipe_id}"))
                .with_resource_id(recipe_id.to_string()));
        }
        let added = self.favorites.add(user_id, recipe_id).await?;
        debug!(user.id = %user_id, recipe.id = %recipe_id, added, "Favorite added");
        Ok(added)
    }

    /// Unfavorite a recipe; removing an absent pair is a no-op
    ///
    /// # Errors
    ///
    /// Returns a storage error if the delete fails
    pub async fn remove(&self, user_id: UserId, recipe_id: RecipeId) -> AppResult<bool> {
        Ok(self.favorites.remove(user_id, recipe_id).await?)
    }

    /// A user's active favorite recipes in the order they were favorited
    ///
    /// # Errors
    ///
    /// Returns a storage error if either listing fails
    pub async fn list(&self, user_id: UserId, page: PageRequest) -> AppResult<Page<Recipe>> {
        let favorites = self.favorites.list_for_user(user_id).await?;
        let mut active: HashMap<RecipeId, Recipe> = self
            .lifecycle
            .list_active()
            .await?
            .into_iter()
            .map(|recipe| (recipe.id, recipe))
            .collect();

        let recipes: Vec<Recipe> = favorites
            .iter()
            .filter_map(|favorite| active.remove(&favorite.recipe_id))
            .collect();

        Ok(Page {
            total: recipes.len(),
            items: page.apply(recipes),
            page: page.page,
            limit: page.limit,
        })
    }
}
