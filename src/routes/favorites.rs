// ABOUTME: Route handlers for per-user favorite recipes
// ABOUTME: Add, remove, and list favorites restricted to active recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use pantry_core::errors::AppError;
use pantry_core::models::UserId;
use serde::Deserialize;
use serde_json::json;

use super::parse_recipe_id;
use crate::resources::ServerResources;

/// Pagination parameters for the favorites listing
#[derive(Debug, Default, Deserialize)]
pub struct FavoritesQuery {
    /// 1-based page number
    pub page: Option<String>,
    /// Page size
    pub limit: Option<String>,
}

/// Favorites routes handler
pub struct FavoriteRoutes;

impl FavoriteRoutes {
    /// Create all favorites routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/users/:user_id/favorites", get(Self::handle_list))
            .route(
                "/users/:user_id/favorites/:recipe_id",
                put(Self::handle_add).delete(Self::handle_remove),
            )
            .with_state(resources)
    }

    fn parse_user_id(raw: &str) -> Result<UserId, AppError> {
        raw.parse()
            .map_err(|_| AppError::invalid_input(format!("Invalid user id: {raw}")))
    }

    /// Handle PUT /users/:user_id/favorites/:recipe_id
    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        Path((user_id, recipe_id)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let added = resources
            .favorites
            .add(Self::parse_user_id(&user_id)?, parse_recipe_id(&recipe_id)?)
            .await?;
        Ok((StatusCode::OK, Json(json!({ "added": added }))).into_response())
    }

    /// Handle DELETE /users/:user_id/favorites/:recipe_id
    async fn handle_remove(
        State(resources): State<Arc<ServerResources>>,
        Path((user_id, recipe_id)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        resources
            .favorites
            .remove(Self::parse_user_id(&user_id)?, parse_recipe_id(&recipe_id)?)
            .await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle GET /users/:user_id/favorites - Active favorites in favoriting order
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        Query(query): Query<FavoritesQuery>,
    ) -> Result<Response, AppError> {
        let page = resources.page_request(query.page.as_deref(), query.limit.as_deref());
        let favorites = resources
            .favorites
            .list(Self::parse_user_id(&user_id)?, page)
            .await?;
        Ok((StatusCode::OK, Json(favorites)).into_response())
    }
}
