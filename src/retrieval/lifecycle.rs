// ABOUTME: Recipe lifecycle manager enforcing the Active/Trashed/Purged state machine
// ABOUTME: Every retrieval path reads the active or trashed partition through this type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use pantry_core::errors::{AppError, AppResult};
use pantry_core::models::{
    LifecycleEvent, LifecycleState, LifecycleViolation, NewRecipe, Recipe, RecipeEdit, RecipeId,
    RecipePatch, TransitionOutcome,
};
use tracing::{debug, info, instrument};

use crate::database::repositories::{PurgeOutcome, RecipeFilter, RecipeStore};

/// Enforces lifecycle transitions on top of a recipe store
#[derive(Clone)]
pub struct LifecycleManager {
    recipes: Arc<dyn RecipeStore>,
}

impl LifecycleManager {
    /// Create a manager over an injected store
    #[must_use]
    pub fn new(recipes: Arc<dyn RecipeStore>) -> Self {
        Self { recipes }
    }

    /// Create a recipe in the `Active` state
    ///
    /// # Errors
    ///
    /// Returns a storage error if the insert fails
    #[instrument(skip(self, recipe), fields(title = %recipe.title.as_str()))]
    pub async fn add(&self, recipe: NewRecipe) -> AppResult<Recipe> {
        let stored = self.recipes.insert(recipe).await?;
        info!(recipe.id = %stored.id, "Recipe added");
        Ok(stored)
    }

    /// Fetch a stored recipe in either state
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown or purged ids
    pub async fn get(&self, id: RecipeId) -> AppResult<Recipe> {
        self.recipes
            .get(id)
            .await?
            .ok_or_else(|| recipe_not_found(id))
    }

    /// Whether the id names an `Active` recipe; unknown ids are not active
    ///
    /// # Errors
    ///
    /// Returns a storage error if the lookup fails
    pub async fn is_active(&self, id: RecipeId) -> AppResult<bool> {
        Ok(self
            .recipes
            .get(id)
            .await?
            .is_some_and(|recipe| recipe.is_active()))
    }

    /// Active recipes in natural order
    ///
    /// # Errors
    ///
    /// Returns a storage error if the listing fails
    pub async fn list_active(&self) -> AppResult<Vec<Recipe>> {
        self.list_in(LifecycleState::Active).await
    }

    /// Trashed recipes in natural order
    ///
    /// # Errors
    ///
    /// Returns a storage error if the listing fails
    pub async fn list_trashed(&self) -> AppResult<Vec<Recipe>> {
        self.list_in(LifecycleState::Trashed).await
    }

    async fn list_in(&self, state: LifecycleState) -> AppResult<Vec<Recipe>> {
        Ok(self
            .recipes
            .list_where(RecipeFilter::InState(state))
            .await?)
    }

    /// Move a recipe to the trash; a trashed recipe stays trashed
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids
    pub async fn delete(&self, id: RecipeId) -> AppResult<Recipe> {
        self.transition(id, LifecycleEvent::Delete).await
    }

    /// Bring a recipe back from the trash; an active recipe stays active
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids
    pub async fn restore(&self, id: RecipeId) -> AppResult<Recipe> {
        self.transition(id, LifecycleEvent::Restore).await
    }

    /// Permanently remove a trashed recipe
    ///
    /// The state check and the delete happen in one store operation, so a
    /// restore that lands first wins and the purge is rejected.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the recipe is active, `NotFound` for unknown ids
    #[instrument(skip(self), fields(recipe.id = %id, transition = %LifecycleEvent::Purge))]
    pub async fn purge(&self, id: RecipeId) -> AppResult<()> {
        match self.recipes.delete_trashed(id).await? {
            PurgeOutcome::Purged => {
                info!("Recipe purged");
                Ok(())
            }
            PurgeOutcome::NotTrashed => {
                let violation = LifecycleViolation {
                    from: LifecycleState::Active,
                    event: LifecycleEvent::Purge,
                };
                Err(AppError::invalid_transition(violation.to_string())
                    .with_resource_id(id.to_string()))
            }
            PurgeOutcome::Missing => Err(recipe_not_found(id)),
        }
    }

    /// Change fields without touching the lifecycle state
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids
    #[instrument(skip(self, edit), fields(recipe.id = %id))]
    pub async fn edit(&self, id: RecipeId, edit: RecipeEdit) -> AppResult<Recipe> {
        if edit.is_empty() {
            return self.get(id).await;
        }
        self.recipes
            .update(id, RecipePatch::fields(edit))
            .await?
            .ok_or_else(|| recipe_not_found(id))
    }

    /// Apply a delete or restore; the write is a single last-write-wins update
    #[instrument(skip(self), fields(recipe.id = %id, transition = %event))]
    async fn transition(&self, id: RecipeId, event: LifecycleEvent) -> AppResult<Recipe> {
        let current = self.get(id).await?;
        let outcome = current.state.apply(event).map_err(|violation| {
            AppError::invalid_transition(violation.to_string()).with_resource_id(id.to_string())
        })?;

        match outcome {
            TransitionOutcome::Unchanged => {
                debug!(state = %current.state, "Transition is a no-op");
                Ok(current)
            }
            TransitionOutcome::MoveTo(next) => {
                let updated = self
                    .recipes
                    .update(id, RecipePatch::state(next))
                    .await?
                    .ok_or_else(|| recipe_not_found(id))?;
                info!(from = %current.state, to = %next, "Recipe state changed");
                Ok(updated)
            }
        }
    }
}

fn recipe_not_found(id: RecipeId) -> AppError {
    AppError::not_found(format!("Recipe {id}")).with_resource_id(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::repositories::MemoryRecipeStore;
    use pantry_core::errors::ErrorKind;
    use pantry_core::models::{Ingredients, RecipeTitle};

    fn manager() -> LifecycleManager {
        LifecycleManager::new(Arc::new(MemoryRecipeStore::new()))
    }

    fn recipe(title: &str) -> NewRecipe {
        NewRecipe {
            title: RecipeTitle::parse(title).unwrap(),
            description: String::new(),
            thumbnail: None,
            source_url: None,
            ingredients: Ingredients::from_raw(["egg"]),
        }
    }

    #[tokio::test]
    async fn test_delete_twice_stays_trashed() {
        let lifecycle = manager();
        let stored = lifecycle.add(recipe("Omelette")).await.unwrap();

        lifecycle.delete(stored.id).await.unwrap();
        let again = lifecycle.delete(stored.id).await.unwrap();
        assert_eq!(again.state, LifecycleState::Trashed);
        assert!(!lifecycle.is_active(stored.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_purge_active_is_rejected() {
        let lifecycle = manager();
        let stored = lifecycle.add(recipe("Pancakes")).await.unwrap();

        let error = lifecycle.purge(stored.id).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidTransition);
        assert!(lifecycle.is_active(stored.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let lifecycle = manager();
        let error = lifecycle.restore(RecipeId::new()).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }
}
