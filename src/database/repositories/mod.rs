// ABOUTME: Store traits for recipe, rating and favorite persistence
// ABOUTME: Abstracts the document store so the retrieval engine never depends on a backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Repositories
//!
//! The retrieval engine consumes these traits as injected `Arc<dyn ...>`
//! handles. Two backends are provided:
//!
//! - `SQLite` via sqlx (`recipe_repository`, `rating_repository`, `favorite_repository`)
//! - In-memory, insertion ordered (`memory`)
//!
//! Every backend must enumerate recipes in a stable *natural order* (insertion
//! order), since ranking ties and pagination are defined relative to it.

/// Favorite persistence on `SQLite`
pub mod favorite_repository;
/// In-memory stores for tests, benches and dry runs
pub mod memory;
/// Rating persistence on `SQLite`
pub mod rating_repository;
/// Recipe persistence on `SQLite`
pub mod recipe_repository;

pub use favorite_repository::SqliteFavoriteStore;
pub use memory::{MemoryFavoriteStore, MemoryRatingStore, MemoryRecipeStore};
pub use rating_repository::SqliteRatingStore;
pub use recipe_repository::SqliteRecipeStore;

use async_trait::async_trait;
use pantry_core::errors::StoreError;
use pantry_core::models::{
    Favorite, LifecycleState, NewRating, NewRecipe, Rating, Recipe, RecipeId, RecipePatch, UserId,
};

/// Which recipes a listing should enumerate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeFilter {
    /// Every stored recipe
    All,
    /// Recipes in one lifecycle state
    InState(LifecycleState),
}

impl RecipeFilter {
    /// Evaluate the filter against a document
    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            Self::All => true,
            Self::InState(state) => recipe.state == *state,
        }
    }
}

/// Result of a conditional purge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeOutcome {
    /// The trashed record was removed
    Purged,
    /// The record exists but was not trashed at the time of the delete
    NotTrashed,
    /// No record with that id
    Missing,
}

/// Keyed document store for recipes
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Fetch one recipe by id
    async fn get(&self, id: RecipeId) -> Result<Option<Recipe>, StoreError>;

    /// Enumerate recipes matching a filter, in natural order
    async fn list_where(&self, filter: RecipeFilter) -> Result<Vec<Recipe>, StoreError>;

    /// Insert a new recipe in the `Active` state and return the stored document
    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError>;

    /// Atomically apply a patch; returns `None` if the id is unknown
    async fn update(&self, id: RecipeId, patch: RecipePatch)
        -> Result<Option<Recipe>, StoreError>;

    /// Remove the record only if it is trashed, checked and deleted as one operation
    async fn delete_trashed(&self, id: RecipeId) -> Result<PurgeOutcome, StoreError>;
}

/// Store for immutable ratings
#[async_trait]
pub trait RatingStore: Send + Sync {
    /// All ratings whose recipe reference is in `recipe_ids`, in one round trip
    async fn list_for_recipes(&self, recipe_ids: &[RecipeId]) -> Result<Vec<Rating>, StoreError>;

    /// All ratings of a single recipe
    async fn list_for_recipe(&self, recipe_id: RecipeId) -> Result<Vec<Rating>, StoreError>;

    /// Persist a new rating
    async fn insert(&self, rating: NewRating) -> Result<Rating, StoreError>;
}

/// Store for (user, recipe) favorite pairs
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Add the pair; returns `false` if it was already present
    async fn add(&self, user_id: UserId, recipe_id: RecipeId) -> Result<bool, StoreError>;

    /// Remove the pair; returns whether it was present
    async fn remove(&self, user_id: UserId, recipe_id: RecipeId) -> Result<bool, StoreError>;

    /// A user's favorites in the order they were added
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Favorite>, StoreError>;
}
