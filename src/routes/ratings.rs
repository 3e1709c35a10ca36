// ABOUTME: Route handlers for recipe ratings
// ABOUTME: Records user scores and returns per-recipe rating statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use pantry_core::errors::AppError;
use pantry_core::models::{RatingSummary, RecipeId};
use serde::Deserialize;

use super::parse_recipe_id;
use crate::resources::ServerResources;
use crate::retrieval::RateRecipeRequest;

/// Request body for batch rating statistics
#[derive(Debug, Deserialize)]
pub struct RatingSummaryRequest {
    /// Recipes to summarize
    #[serde(default)]
    pub recipe_ids: Vec<String>,
}

/// Rating routes handler
pub struct RatingRoutes;

impl RatingRoutes {
    /// Create all rating routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/recipes/:id/ratings", post(Self::handle_rate))
            .route("/recipes/ratings/summary", post(Self::handle_summary))
            .with_state(resources)
    }

    /// Handle POST /recipes/:id/ratings - Rate an active recipe
    async fn handle_rate(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Json(body): Json<RateRecipeRequest>,
    ) -> Result<Response, AppError> {
        let rating = resources.ratings.rate(parse_recipe_id(&id)?, body).await?;
        Ok((StatusCode::CREATED, Json(rating)).into_response())
    }

    /// Handle POST /recipes/ratings/summary - Statistics keyed by recipe id
    ///
    /// Every requested id appears in the response, with a zero summary when unrated.
    async fn handle_summary(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RatingSummaryRequest>,
    ) -> Result<Response, AppError> {
        let ids = body
            .recipe_ids
            .iter()
            .map(|raw| parse_recipe_id(raw))
            .collect::<Result<Vec<RecipeId>, AppError>>()?;

        let summaries: BTreeMap<String, RatingSummary> = resources
            .retrieval
            .annotate_ratings(&ids)
            .await?
            .into_iter()
            .map(|(id, summary)| (id.to_string(), summary))
            .collect();
        Ok((StatusCode::OK, Json(summaries)).into_response())
    }
}
