// ABOUTME: Recipe retrieval engine: lifecycle, ingredient ranking, title search, ratings
// ABOUTME: Depends only on the store traits, never on a concrete backend or transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Retrieval Engine
//!
//! Every component reads recipes through [`LifecycleManager`], so trashed
//! recipes never leak into browse, search or match results, and purged
//! recipes are gone everywhere.

/// Retrieval facade
pub mod facade;
/// Favorites bookkeeping
pub mod favorites;
/// Lifecycle state machine enforcement
pub mod lifecycle;
/// Ingredient-overlap ranking
pub mod matcher;
/// Rating aggregation and creation
pub mod ratings;
/// Title substring search
pub mod title_search;

pub use facade::{Rated, RecipeRef, RetrievalFacade};
pub use favorites::FavoritesService;
pub use lifecycle::LifecycleManager;
pub use matcher::{IngredientMatcher, IngredientQuery, RankedRecipe};
pub use ratings::{FetchStrategy, RateRecipeRequest, RatingAggregator, RatingService};
pub use title_search::TitleSearch;
