// ABOUTME: In-memory recipe, rating and favorite stores with insertion-ordered enumeration
// ABOUTME: Used by tests, benchmarks and the seeder dry run; one RwLock per collection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use pantry_core::errors::StoreError;
use pantry_core::models::{
    Favorite, LifecycleState, NewRating, NewRecipe, Rating, RatingId, Recipe, RecipeId,
    RecipePatch, UserId,
};
use tokio::sync::RwLock;

use super::{FavoriteStore, PurgeOutcome, RatingStore, RecipeFilter, RecipeStore};

/// Insertion-ordered in-memory recipe store
#[derive(Default)]
pub struct MemoryRecipeStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl MemoryRecipeStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn get(&self, id: RecipeId) -> Result<Option<Recipe>, StoreError> {
        let recipes = self.recipes.read().await;
        Ok(recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn list_where(&self, filter: RecipeFilter) -> Result<Vec<Recipe>, StoreError> {
        let recipes = self.recipes.read().await;
        Ok(recipes.iter().filter(|r| filter.matches(r)).cloned().collect())
    }

    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let now = Utc::now();
        let stored = Recipe {
            id: RecipeId::new(),
            title: recipe.title.into_inner(),
            description: recipe.description,
            thumbnail: recipe.thumbnail,
            source_url: recipe.source_url,
            ingredients: recipe.ingredients,
            state: LifecycleState::Active,
            created_at: now,
            updated_at: now,
        };
        self.recipes.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: RecipeId,
        patch: RecipePatch,
    ) -> Result<Option<Recipe>, StoreError> {
        let mut recipes = self.recipes.write().await;
        Ok(recipes.iter_mut().find(|r| r.id == id).map(|recipe| {
            patch.apply_to(recipe, Utc::now());
            recipe.clone()
        }))
    }

    async fn delete_trashed(&self, id: RecipeId) -> Result<PurgeOutcome, StoreError> {
        let mut recipes = self.recipes.write().await;
        let Some(position) = recipes.iter().position(|r| r.id == id) else {
            return Ok(PurgeOutcome::Missing);
        };
        if recipes[position].state != LifecycleState::Trashed {
            return Ok(PurgeOutcome::NotTrashed);
        }
        recipes.remove(position);
        Ok(PurgeOutcome::Purged)
    }
}

/// In-memory rating store that counts round trips
#[derive(Default)]
pub struct MemoryRatingStore {
    ratings: RwLock<Vec<Rating>>,
    queries: AtomicUsize,
}

impl MemoryRatingStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of read round trips served so far
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RatingStore for MemoryRatingStore {
    async fn list_for_recipes(&self, recipe_ids: &[RecipeId]) -> Result<Vec<Rating>, StoreError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let wanted: HashSet<_> = recipe_ids.iter().copied().collect();
        let ratings = self.ratings.read().await;
        Ok(ratings
            .iter()
            .filter(|r| wanted.contains(&r.recipe_id))
            .cloned()
            .collect())
    }

    async fn list_for_recipe(&self, recipe_id: RecipeId) -> Result<Vec<Rating>, StoreError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let ratings = self.ratings.read().await;
        Ok(ratings
            .iter()
            .filter(|r| r.recipe_id == recipe_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, rating: NewRating) -> Result<Rating, StoreError> {
        let stored = Rating {
            id: RatingId::new(),
            user_id: rating.user_id,
            recipe_id: rating.recipe_id,
            score: rating.score,
            comment: rating.comment,
            created_at: Utc::now(),
        };
        self.ratings.write().await.push(stored.clone());
        Ok(stored)
    }
}

/// In-memory favorite store
#[derive(Default)]
pub struct MemoryFavoriteStore {
    favorites: RwLock<Vec<Favorite>>,
}

impl MemoryFavoriteStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteStore for MemoryFavoriteStore {
    async fn add(&self, user_id: UserId, recipe_id: RecipeId) -> Result<bool, StoreError> {
        let mut favorites = self.favorites.write().await;
        if favorites
            .iter()
            .any(|f| f.user_id == user_id && f.recipe_id == recipe_id)
        {
            return Ok(false);
        }
        favorites.push(Favorite {
            user_id,
            recipe_id,
            created_at: Utc::now(),
        });
        Ok(true)
    }

    async fn remove(&self, user_id: UserId, recipe_id: RecipeId) -> Result<bool, StoreError> {
        let mut favorites = self.favorites.write().await;
        let before = favorites.len();
        favorites.retain(|f| !(f.user_id == user_id && f.recipe_id == recipe_id));
        Ok(favorites.len() != before)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Favorite>, StoreError> {
        let favorites = self.favorites.read().await;
        Ok(favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }
}
