// ABOUTME: Integration tests for the recipe lifecycle (active, trashed, purged)
// ABOUTME: Verifies visibility rules, idempotent transitions and purge restrictions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use helpers::fixtures::{memory_database, memory_facade, new_recipe};
use pantry_recipes::database::repositories::{
    MemoryRecipeStore, PurgeOutcome, RecipeFilter, RecipeStore,
};
use pantry_recipes::errors::{ErrorKind, StoreError};
use pantry_recipes::models::{
    LifecycleState, NewRecipe, Recipe, RecipeEdit, RecipeId, RecipePatch, RecipeTitle,
};
use pantry_recipes::pagination::PageRequest;
use pantry_recipes::retrieval::{FetchStrategy, IngredientQuery, LifecycleManager};

fn first_page() -> PageRequest {
    PageRequest::new(None, None)
}

// ============================================================================
// Visibility
// ============================================================================

#[tokio::test]
async fn test_trashed_recipe_leaves_every_active_view() {
    let (facade, _, _) = memory_facade(FetchStrategy::Batched);
    let kept = facade.add(new_recipe("Egg Fried Rice", &["egg", "rice"])).await.unwrap();
    let gone = facade.add(new_recipe("Egg Salad", &["egg", "lettuce"])).await.unwrap();

    let trashed = facade.delete(gone.id).await.unwrap();
    assert_eq!(trashed.state, LifecycleState::Trashed);

    let browse = facade.browse(Some("egg"), first_page()).await.unwrap();
    assert_eq!(browse.total, 1);
    assert_eq!(browse.items[0].id, kept.id);

    let matched = facade
        .by_ingredients(&IngredientQuery::new(["egg"]))
        .await
        .unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].recipe.id, kept.id);

    let trash = facade.trash(None, first_page()).await.unwrap();
    assert_eq!(trash.total, 1);
    assert_eq!(trash.items[0].id, gone.id);
}

#[tokio::test]
async fn test_restore_returns_recipe_to_active_views() {
    let (facade, _, _) = memory_facade(FetchStrategy::Batched);
    let recipe = facade.add(new_recipe("Tomato Soup", &["tomato"])).await.unwrap();

    facade.delete(recipe.id).await.unwrap();
    let restored = facade.restore(recipe.id).await.unwrap();
    assert_eq!(restored.state, LifecycleState::Active);

    let browse = facade.browse(None, first_page()).await.unwrap();
    assert_eq!(browse.total, 1);
    assert!(facade.trash(None, first_page()).await.unwrap().items.is_empty());
}

// ============================================================================
// Idempotence and rejected transitions
// ============================================================================

#[tokio::test]
async fn test_delete_and_restore_are_idempotent() {
    let (facade, _, _) = memory_facade(FetchStrategy::Batched);
    let recipe = facade.add(new_recipe("Pancakes", &["flour", "egg"])).await.unwrap();

    let restored = facade.restore(recipe.id).await.unwrap();
    assert_eq!(restored.state, LifecycleState::Active);

    facade.delete(recipe.id).await.unwrap();
    let again = facade.delete(recipe.id).await.unwrap();
    assert_eq!(again.state, LifecycleState::Trashed);
}

#[tokio::test]
async fn test_purge_requires_trash_first() {
    let (facade, _, _) = memory_facade(FetchStrategy::Batched);
    let recipe = facade.add(new_recipe("Omelette", &["egg"])).await.unwrap();

    let err = facade.purge(recipe.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    assert!(facade.get(recipe.id).await.is_ok());

    facade.delete(recipe.id).await.unwrap();
    facade.purge(recipe.id).await.unwrap();

    let err = facade.get(recipe.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(facade.trash(None, first_page()).await.unwrap().items.is_empty());
}

#[tokio::test]
async fn test_purged_recipe_cannot_be_restored() {
    let (facade, _, _) = memory_facade(FetchStrategy::Batched);
    let recipe = facade.add(new_recipe("Crepes", &["flour"])).await.unwrap();
    facade.delete(recipe.id).await.unwrap();
    facade.purge(recipe.id).await.unwrap();

    let err = facade.restore(recipe.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let (facade, _, _) = memory_facade(FetchStrategy::Batched);
    let missing = RecipeId::new();

    assert_eq!(facade.delete(missing).await.unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(facade.restore(missing).await.unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(facade.purge(missing).await.unwrap_err().kind(), ErrorKind::NotFound);
}

// ============================================================================
// Edits
// ============================================================================

#[tokio::test]
async fn test_edit_keeps_lifecycle_state() {
    let (facade, _, _) = memory_facade(FetchStrategy::Batched);
    let recipe = facade.add(new_recipe("Chili", &["chili"])).await.unwrap();
    facade.delete(recipe.id).await.unwrap();

    let edit = RecipeEdit {
        title: Some(RecipeTitle::parse("Beef Chili").unwrap()),
        ..RecipeEdit::default()
    };
    let edited = facade.edit(recipe.id, edit).await.unwrap();

    assert_eq!(edited.title, "Beef Chili");
    assert_eq!(edited.state, LifecycleState::Trashed);
    assert!(edited.updated_at >= recipe.updated_at);
}

// ============================================================================
// Purge racing a restore
// ============================================================================

/// Store whose purge sees a restore commit just before it runs
struct RestoreBeforePurge {
    inner: Arc<dyn RecipeStore>,
}

#[async_trait]
impl RecipeStore for RestoreBeforePurge {
    async fn get(&self, id: RecipeId) -> Result<Option<Recipe>, StoreError> {
        self.inner.get(id).await
    }

    async fn list_where(&self, filter: RecipeFilter) -> Result<Vec<Recipe>, StoreError> {
        self.inner.list_where(filter).await
    }

    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        self.inner.insert(recipe).await
    }

    async fn update(
        &self,
        id: RecipeId,
        patch: RecipePatch,
    ) -> Result<Option<Recipe>, StoreError> {
        self.inner.update(id, patch).await
    }

    async fn delete_trashed(&self, id: RecipeId) -> Result<PurgeOutcome, StoreError> {
        self.inner
            .update(id, RecipePatch::state(LifecycleState::Active))
            .await?;
        self.inner.delete_trashed(id).await
    }
}

async fn assert_restore_wins_over_purge(store: Arc<dyn RecipeStore>) {
    let plain = LifecycleManager::new(store.clone());
    let racing = LifecycleManager::new(Arc::new(RestoreBeforePurge { inner: store }));

    let recipe = plain.add(new_recipe("Shakshuka", &["egg", "tomato"])).await.unwrap();
    plain.delete(recipe.id).await.unwrap();

    let err = racing.purge(recipe.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);

    let survivor = plain.get(recipe.id).await.unwrap();
    assert_eq!(survivor.state, LifecycleState::Active);
}

#[tokio::test]
async fn test_restored_recipe_is_never_purged_in_memory() {
    assert_restore_wins_over_purge(Arc::new(MemoryRecipeStore::new())).await;
}

#[tokio::test]
async fn test_restored_recipe_is_never_purged_in_sqlite() {
    let database = memory_database().await;
    assert_restore_wins_over_purge(database.recipe_store()).await;
}
