// ABOUTME: Route module organization for the recipe HTTP API
// ABOUTME: Merges per-domain routers and applies tracing, timeout, body limit and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Each domain module holds route definitions and thin handlers that
//! delegate to the retrieval services.

/// Registration and credential checks
pub mod auth;
/// Per-user favorites
pub mod favorites;
/// Health check and readiness routes
pub mod health;
/// Rating creation and statistics
pub mod ratings;
/// Recipe browse, matching and lifecycle routes
pub mod recipes;

pub use auth::AuthRoutes;
pub use favorites::FavoriteRoutes;
pub use health::HealthRoutes;
pub use ratings::RatingRoutes;
pub use recipes::RecipeRoutes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use pantry_core::constants::defaults::MAX_BODY_BYTES;
use pantry_core::errors::AppError;
use pantry_core::models::RecipeId;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::setup_cors;
use crate::resources::ServerResources;

/// Build the complete application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    let timeout = Duration::from_secs(resources.config.request_timeout_secs);
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(RecipeRoutes::routes(Arc::clone(&resources)))
        .merge(RatingRoutes::routes(Arc::clone(&resources)))
        .merge(FavoriteRoutes::routes(Arc::clone(&resources)))
        .merge(AuthRoutes::routes(resources))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Parse a recipe id taken from a path segment or request body
pub(crate) fn parse_recipe_id(raw: &str) -> Result<RecipeId, AppError> {
    raw.parse()
        .map_err(|_| AppError::invalid_input(format!("Invalid recipe id: {raw}")))
}

/// Whether a `with_ratings` flag asks for rating statistics
pub(crate) fn wants_ratings(flag: Option<&str>) -> bool {
    matches!(flag, Some("true" | "1"))
}
