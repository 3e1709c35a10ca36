// ABOUTME: Integration tests for the SQLite repositories
// ABOUTME: Natural order, cascading purge, favorites, and persistence across reconnects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::fixtures::{memory_database, new_recipe};
use pantry_recipes::config::DatabaseUrl;
use pantry_recipes::database::repositories::{FavoriteStore, RatingStore, RecipeFilter, RecipeStore};
use pantry_recipes::database::Database;
use pantry_recipes::errors::ErrorKind;
use pantry_recipes::models::{LifecycleState, NewRating, RecipeId, Score, UserId};
use pantry_recipes::pagination::PageRequest;
use pantry_recipes::retrieval::{FavoritesService, FetchStrategy, RetrievalFacade};
use tempfile::TempDir;

fn facade_over(database: &Database) -> RetrievalFacade {
    RetrievalFacade::new(
        database.recipe_store(),
        database.rating_store(),
        FetchStrategy::Batched,
    )
}

// ============================================================================
// Recipes
// ============================================================================

#[tokio::test]
async fn test_listing_keeps_insertion_order() {
    let database = memory_database().await;
    let store = database.recipe_store();
    let facade = facade_over(&database);

    let mut expected = Vec::new();
    for title in ["Zucchini Bake", "Apple Pie", "Mushroom Toast"] {
        expected.push(facade.add(new_recipe(title, &["butter"])).await.unwrap().id);
    }

    let listed: Vec<RecipeId> = store
        .list_where(RecipeFilter::All)
        .await
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(listed, expected);
}

#[tokio::test]
async fn test_state_filter_and_round_trip_of_fields() {
    let database = memory_database().await;
    let store = database.recipe_store();
    let facade = facade_over(&database);

    let recipe = facade
        .add(new_recipe("Hummus Plate", &["Hummus", "olive", "hummus"]))
        .await
        .unwrap();
    facade.delete(recipe.id).await.unwrap();

    let stored = store.get(recipe.id).await.unwrap().unwrap();
    assert_eq!(stored.state, LifecycleState::Trashed);
    assert_eq!(stored.ingredients.len(), 2);
    assert!(stored.ingredients.contains("hummus"));
    assert_eq!(stored.created_at, recipe.created_at);

    let active = store
        .list_where(RecipeFilter::InState(LifecycleState::Active))
        .await
        .unwrap();
    assert!(active.is_empty());
    let purged = store
        .list_where(RecipeFilter::InState(LifecycleState::Purged))
        .await
        .unwrap();
    assert!(purged.is_empty());
}

#[tokio::test]
async fn test_purge_cascades_to_ratings_and_favorites() {
    let database = memory_database().await;
    let facade = facade_over(&database);
    let ratings = database.rating_store();
    let favorites = FavoritesService::new(facade.lifecycle().clone(), database.favorite_store());
    let user = database.users().create_user("cook@example.com", "secret").await.unwrap();

    let recipe = facade.add(new_recipe("Ravioli", &["ravioli"])).await.unwrap();
    ratings
        .insert(NewRating {
            user_id: user.id,
            recipe_id: recipe.id,
            score: Score::try_from(4).unwrap(),
            comment: None,
        })
        .await
        .unwrap();
    assert!(favorites.add(user.id, recipe.id).await.unwrap());

    facade.delete(recipe.id).await.unwrap();
    facade.purge(recipe.id).await.unwrap();

    assert!(ratings.list_for_recipe(recipe.id).await.unwrap().is_empty());
    let listed = database
        .favorite_store()
        .list_for_user(user.id)
        .await
        .unwrap();
    assert!(listed.is_empty());
}

// ============================================================================
// Favorites
// ============================================================================

#[tokio::test]
async fn test_favorites_are_a_set_and_hide_trashed_recipes() {
    let database = memory_database().await;
    let facade = facade_over(&database);
    let favorites = FavoritesService::new(facade.lifecycle().clone(), database.favorite_store());
    let user = UserId::new();

    let soup = facade.add(new_recipe("Soup", &["carrots"])).await.unwrap();
    let stew = facade.add(new_recipe("Stew", &["beef stock"])).await.unwrap();

    assert!(favorites.add(user, stew.id).await.unwrap());
    assert!(favorites.add(user, soup.id).await.unwrap());
    assert!(!favorites.add(user, stew.id).await.unwrap());

    let page = favorites.list(user, PageRequest::default()).await.unwrap();
    let titles: Vec<_> = page.items.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Stew", "Soup"]);

    facade.delete(stew.id).await.unwrap();
    let page = favorites.list(user, PageRequest::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, soup.id);

    assert!(favorites.remove(user, soup.id).await.unwrap());
    assert!(!favorites.remove(user, soup.id).await.unwrap());
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_file_database_survives_reconnect() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recipes.db");
    let url = DatabaseUrl::parse_url(&format!("sqlite:{}", path.display())).unwrap();

    let id = {
        let database = Database::connect(&url).await.unwrap();
        let recipe = facade_over(&database)
            .add(new_recipe("Fried Rice", &["rice", "egg"]))
            .await
            .unwrap();
        database.pool().close().await;
        recipe.id
    };

    let database = Database::connect(&url).await.unwrap();
    let recipe = facade_over(&database).get(id).await.unwrap();
    assert_eq!(recipe.title, "Fried Rice");
}

// ============================================================================
// Concurrency
// ============================================================================

async fn file_database(dir: &TempDir) -> Database {
    let path = dir.path().join("recipes.db");
    let url = DatabaseUrl::parse_url(&format!("sqlite:{}", path.display())).unwrap();
    Database::connect(&url).await.unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_delete_and_restore_all_succeed() {
    let dir = TempDir::new().unwrap();
    let database = file_database(&dir).await;
    let facade = facade_over(&database);
    let recipe = facade.add(new_recipe("Paella", &["rice", "saffron"])).await.unwrap();

    let tasks: Vec<_> = (0..200)
        .map(|n| {
            let facade = facade.clone();
            tokio::spawn(async move {
                if n % 2 == 0 {
                    facade.delete(recipe.id).await
                } else {
                    facade.restore(recipe.id).await
                }
            })
        })
        .collect();

    for task in tasks {
        let result = task.await.unwrap();
        assert!(result.is_ok(), "transition failed: {result:?}");
    }

    let stored = facade.get(recipe.id).await.unwrap();
    assert!(matches!(
        stored.state,
        LifecycleState::Active | LifecycleState::Trashed
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_purge_never_removes_an_active_recipe() {
    let dir = TempDir::new().unwrap();
    let database = file_database(&dir).await;
    let facade = facade_over(&database);

    for n in 0..25 {
        let recipe = facade
            .add(new_recipe(&format!("Gratin {n}"), &["potato"]))
            .await
            .unwrap();
        facade.delete(recipe.id).await.unwrap();

        let purge = tokio::spawn({
            let facade = facade.clone();
            async move { facade.purge(recipe.id).await }
        });
        let restore = tokio::spawn({
            let facade = facade.clone();
            async move { facade.restore(recipe.id).await }
        });
        let purged = purge.await.unwrap();
        let restored = restore.await.unwrap();

        match purged {
            Ok(()) => {
                let err = facade.get(recipe.id).await.unwrap_err();
                assert_eq!(err.kind(), ErrorKind::NotFound);
            }
            Err(err) => {
                assert_eq!(err.kind(), ErrorKind::InvalidTransition);
                assert!(restored.is_ok());
                let stored = facade.get(recipe.id).await.unwrap();
                assert_eq!(stored.state, LifecycleState::Active);
            }
        }
        if let Err(err) = restored {
            assert_eq!(err.kind(), ErrorKind::NotFound);
        }
    }
}
