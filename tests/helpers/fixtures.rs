// ABOUTME: Recipe fixtures and store setup shared by integration tests
// ABOUTME: Builds in-memory and SQLite-backed resources with deterministic data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use pantry_recipes::config::{DatabaseUrl, ServerConfig};
use pantry_recipes::database::repositories::{MemoryRatingStore, MemoryRecipeStore};
use pantry_recipes::database::Database;
use pantry_recipes::models::{CreateRecipeRequest, NewRecipe};
use pantry_recipes::resources::ServerResources;
use pantry_recipes::retrieval::{FetchStrategy, RetrievalFacade};

/// Validated recipe input with the given title and ingredients
pub fn new_recipe(title: &str, ingredients: &[&str]) -> NewRecipe {
    NewRecipe::try_from(CreateRecipeRequest {
        title: title.to_owned(),
        description: format!("{title} description"),
        thumbnail: None,
        source_url: None,
        ingredients: ingredients.iter().map(|&i| i.to_owned()).collect(),
    })
    .expect("fixture recipe must be valid")
}

/// Facade over fresh in-memory stores, returning the stores for inspection
pub fn memory_facade(
    strategy: FetchStrategy,
) -> (RetrievalFacade, Arc<MemoryRecipeStore>, Arc<MemoryRatingStore>) {
    let recipes = Arc::new(MemoryRecipeStore::new());
    let ratings = Arc::new(MemoryRatingStore::new());
    let facade = RetrievalFacade::new(recipes.clone(), ratings.clone(), strategy);
    (facade, recipes, ratings)
}

/// Freshly migrated in-memory `SQLite` database
pub async fn memory_database() -> Database {
    Database::connect(&DatabaseUrl::Memory)
        .await
        .expect("in-memory database must open")
}

/// Server resources over an in-memory `SQLite` database with default config
pub async fn sqlite_resources() -> Arc<ServerResources> {
    let database = memory_database().await;
    let config = ServerConfig {
        database_url: DatabaseUrl::Memory,
        ..ServerConfig::default()
    };
    Arc::new(ServerResources::new(&database, Arc::new(config)))
}
