// ABOUTME: Core data models for the recipe retrieval engine
// ABOUTME: Re-exports recipe, lifecycle, rating, favorite and user types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Type-safe identifiers
pub mod ids;
/// Recipe lifecycle state machine
pub mod lifecycle;
/// Ratings, rating summaries and favorites
pub mod rating;
/// Recipe documents and their validated inputs
pub mod recipe;
/// User accounts
pub mod user;

pub use ids::{RatingId, RecipeId, UserId};
pub use lifecycle::{LifecycleEvent, LifecycleState, LifecycleViolation, TransitionOutcome};
pub use rating::{Favorite, NewRating, Rating, RatingSummary, Score};
pub use recipe::{
    normalize_ingredient, CreateRecipeRequest, Ingredients, NewRecipe, Recipe, RecipeEdit,
    RecipePatch, RecipeTitle, UpdateRecipeRequest,
};
pub use user::User;
