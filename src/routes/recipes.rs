// ABOUTME: Route handlers for the recipe REST API
// ABOUTME: Browse, ingredient matching, trash view, and lifecycle transitions over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe routes
//!
//! Every handler delegates to the retrieval facade. Lists can carry rating
//! statistics when the caller passes `with_ratings=true`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use pantry_core::errors::AppError;
use pantry_core::models::{
    CreateRecipeRequest, NewRecipe, Recipe, RecipeEdit, UpdateRecipeRequest,
};
use pantry_core::pagination::Page;
use serde::Deserialize;
use serde_json::Value;

use super::{parse_recipe_id, wants_ratings};
use crate::resources::ServerResources;
use crate::retrieval::{IngredientQuery, Rated};

/// Query parameters for browse and trash listings
///
/// Kept as strings so malformed numbers fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListRecipesQuery {
    /// Case-insensitive title substring
    pub search: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    /// Page size
    pub limit: Option<String>,
    /// Attach rating statistics (`true` or `1`)
    pub with_ratings: Option<String>,
}

/// Query parameters for the trash view
#[derive(Debug, Default, Deserialize)]
pub struct TrashQuery {
    /// Case-insensitive title substring
    pub search: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    /// Page size
    pub limit: Option<String>,
}

/// Query parameters for ingredient matching
#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    /// Attach rating statistics (`true` or `1`)
    pub with_ratings: Option<String>,
}

/// Recipe routes handler
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/recipes", get(Self::handle_browse))
            .route("/recipes", post(Self::handle_create))
            .route("/recipes/ingredients", post(Self::handle_match))
            .route("/recipes/trashed", get(Self::handle_trashed))
            .route("/recipes/:id", get(Self::handle_get))
            .route("/recipes/:id", put(Self::handle_update))
            .route("/recipes/:id", delete(Self::handle_delete))
            .route("/recipes/:id/restore", patch(Self::handle_restore))
            .route("/recipes/:id/permanent", delete(Self::handle_purge))
            .with_state(resources)
    }

    /// Attach rating statistics to a page of recipes
    async fn rated_page(
        resources: &ServerResources,
        page: Page<Recipe>,
    ) -> Result<Page<Rated<Recipe>>, AppError> {
        let Page {
            items,
            page,
            limit,
            total,
        } = page;
        let items = resources.retrieval.with_ratings(items).await?;
        Ok(Page {
            items,
            page,
            limit,
            total,
        })
    }

    /// Handle GET /recipes - Paginated title search over active recipes
    async fn handle_browse(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ListRecipesQuery>,
    ) -> Result<Response, AppError> {
        let page = resources.page_request(query.page.as_deref(), query.limit.as_deref());
        let results = resources
            .retrieval
            .browse(query.search.as_deref(), page)
            .await?;

        if wants_ratings(query.with_ratings.as_deref()) {
            let rated = Self::rated_page(&resources, results).await?;
            return Ok((StatusCode::OK, Json(rated)).into_response());
        }
        Ok((StatusCode::OK, Json(results)).into_response())
    }

    /// Handle POST /recipes/ingredients - Rank active recipes by ingredient overlap
    async fn handle_match(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<MatchQuery>,
        Json(body): Json<Value>,
    ) -> Result<Response, AppError> {
        let ingredients = body.get("ingredients").unwrap_or(&Value::Null);
        let ingredient_query = IngredientQuery::from_json(ingredients)?;
        let ranked = resources.retrieval.by_ingredients(&ingredient_query).await?;

        if wants_ratings(query.with_ratings.as_deref()) {
            let rated = resources.retrieval.with_ratings(ranked).await?;
            return Ok((StatusCode::OK, Json(rated)).into_response());
        }
        Ok((StatusCode::OK, Json(ranked)).into_response())
    }

    /// Handle GET /recipes/trashed - Paginated trash view
    async fn handle_trashed(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<TrashQuery>,
    ) -> Result<Response, AppError> {
        let page = resources.page_request(query.page.as_deref(), query.limit.as_deref());
        let results = resources
            .retrieval
            .trash(query.search.as_deref(), page)
            .await?;
        Ok((StatusCode::OK, Json(results)).into_response())
    }

    /// Handle POST /recipes - Create an active recipe
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<CreateRecipeRequest>,
    ) -> Result<Response, AppError> {
        let recipe = NewRecipe::try_from(body)?;
        let created = resources.retrieval.add(recipe).await?;
        Ok((StatusCode::CREATED, Json(created)).into_response())
    }

    /// Handle GET /recipes/:id - Fetch one recipe in any stored state
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let recipe = resources.retrieval.get(parse_recipe_id(&id)?).await?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle PUT /recipes/:id - Edit recipe fields
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Json(body): Json<UpdateRecipeRequest>,
    ) -> Result<Response, AppError> {
        let recipe_id = parse_recipe_id(&id)?;
        let edit = RecipeEdit::try_from(body)?;
        let updated = resources.retrieval.edit(recipe_id, edit).await?;
        Ok((StatusCode::OK, Json(updated)).into_response())
    }

    /// Handle DELETE /recipes/:id - Move a recipe to the trash
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let trashed = resources.retrieval.delete(parse_recipe_id(&id)?).await?;
        Ok((StatusCode::OK, Json(trashed)).into_response())
    }

    /// Handle PATCH /recipes/:id/restore - Bring a trashed recipe back
    async fn handle_restore(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let restored = resources.retrieval.restore(parse_recipe_id(&id)?).await?;
        Ok((StatusCode::OK, Json(restored)).into_response())
    }

    /// Handle DELETE /recipes/:id/permanent - Purge a trashed recipe
    async fn handle_purge(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        resources.retrieval.purge(parse_recipe_id(&id)?).await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
