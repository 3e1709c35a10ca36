// ABOUTME: Rating aggregation over a recipe id set and validated rating creation
// ABOUTME: Aggregation is either one batched query or a bounded concurrent fan-out
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use futures_util::{stream, StreamExt, TryStreamExt};
use pantry_core::constants::ratings::DEFAULT_FAN_OUT_CONCURRENCY;
use pantry_core::errors::{AppError, AppResult, StoreError};
use pantry_core::models::{NewRating, Rating, RatingSummary, RecipeId, Score, UserId};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::lifecycle::LifecycleManager;
use crate::database::repositories::RatingStore;

/// How ratings are read for a set of recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStrategy {
    /// One query for the whole id set
    #[default]
    Batched,
    /// One query per recipe, at most `concurrency` in flight
    FanOut {
        /// Maximum concurrent store calls
        concurrency: usize,
    },
}

impl FetchStrategy {
    /// Name used in configuration and logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Batched => "batched",
            Self::FanOut { .. } => "fan_out",
        }
    }
}

impl fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Batched => f.write_str(self.as_str()),
            Self::FanOut { concurrency } => write!(f, "{}({concurrency})", self.as_str()),
        }
    }
}

impl FromStr for FetchStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "batched" | "batch" => Ok(Self::Batched),
            "fan_out" | "fanout" | "fan-out" => Ok(Self::FanOut {
                concurrency: DEFAULT_FAN_OUT_CONCURRENCY,
            }),
            other => Err(AppError::config(format!(
                "Unknown rating fetch strategy '{other}', expected 'batched' or 'fan_out'"
            ))),
        }
    }
}

/// Computes average score and count per recipe
#[derive(Clone)]
pub struct RatingAggregator {
    ratings: Arc<dyn RatingStore>,
    strategy: FetchStrategy,
}

impl RatingAggregator {
    /// Create an aggregator over an injected rating store
    #[must_use]
    pub fn new(ratings: Arc<dyn RatingStore>, strategy: FetchStrategy) -> Self {
        Self { ratings, strategy }
    }

    /// The configured fetch strategy
    #[must_use]
    pub const fn strategy(&self) -> FetchStrategy {
        self.strategy
    }

    /// Summaries for every id in the input; unrated recipes map to `{0, 0}`
    ///
    /// # Errors
    ///
    /// Returns a storage error if any fetch fails
    #[instrument(skip(self, recipe_ids), fields(recipes = recipe_ids.len(), strategy = %self.strategy))]
    pub async fn summarize(
        &self,
        recipe_ids: &[RecipeId],
    ) -> AppResult<HashMap<RecipeId, RatingSummary>> {
        let mut seen = HashSet::new();
        let unique: Vec<RecipeId> = recipe_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();
        if unique.is_empty() {
            return Ok(HashMap::new());
        }

        let ratings = match self.strategy {
            FetchStrategy::Batched => self.ratings.list_for_recipes(&unique).await?,
            FetchStrategy::FanOut { concurrency } => {
                self.fan_out(&unique, concurrency.max(1)).await?
            }
        };
        debug!(fetched = ratings.len(), "Fetched ratings");

        Ok(summarize_ratings(&unique, ratings))
    }

    async fn fan_out(
        &self,
        recipe_ids: &[RecipeId],
        concurrency: usize,
    ) -> Result<Vec<Rating>, StoreError> {
        let per_recipe: Vec<Vec<Rating>> = stream::iter(recipe_ids.iter().copied())
            .map(|id| {
                let ratings = Arc::clone(&self.ratings);
                async move { ratings.list_for_recipe(id).await }
            })
            .buffer_unordered(concurrency)
            .try_collect()
            .await?;
        Ok(per_recipe.into_iter().flatten().collect())
    }
}

/// Group fetched ratings by recipe, keeping only ids from the key set
#[must_use]
pub fn summarize_ratings(
    recipe_ids: &[RecipeId],
    ratings: impl IntoIterator<Item = Rating>,
) -> HashMap<RecipeId, RatingSummary> {
    let mut scores: HashMap<RecipeId, Vec<Score>> =
        recipe_ids.iter().map(|id| (*id, Vec::new())).collect();
    for rating in ratings {
        if let Some(bucket) = scores.get_mut(&rating.recipe_id) {
            bucket.push(rating.score);
        }
    }
    scores
        .into_iter()
        .map(|(id, bucket)| (id, RatingSummary::from_scores(bucket)))
        .collect()
}

/// Untyped rating payload as received at the transport boundary
#[derive(Debug, Clone, Deserialize)]
pub struct RateRecipeRequest {
    /// Who is rating
    pub user_id: UserId,
    /// Raw score, validated into 1..=5
    #[serde(default)]
    pub score: Value,
    /// Optional comment
    #[serde(default)]
    pub comment: Option<String>,
}

/// Creates ratings for active recipes
#[derive(Clone)]
pub struct RatingService {
    lifecycle: LifecycleManager,
    ratings: Arc<dyn RatingStore>,
}

impl RatingService {
    /// Create the service
    #[must_use]
    pub fn new(lifecycle: LifecycleManager, ratings: Arc<dyn RatingStore>) -> Self {
        Self { lifecycle, ratings }
    }

    /// Record a user's rating of an active recipe
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for a score outside 1..=5 and `NotFound`
    /// if the recipe is unknown or trashed
    #[instrument(skip(self, request), fields(recipe.id = %recipe_id, user.id = %request.user_id))]
    pub async fn rate(&self, recipe_id: RecipeId, request: RateRecipeRequest) -> AppResult<Rating> {
        let score = Score::try_from(&request.score)?;
        if !self.lifecycle.is_active(recipe_id).await? {
            return Err(AppError::not_found(format!("Recipe {recipe_id}"))
                .with_resource_id(recipe_id.to_string()));
        }

        let rating = self
            .ratings
            .insert(NewRating {
                user_id: request.user_id,
                recipe_id,
                score,
                comment: request.comment.filter(|c| !c.trim().is_empty()),
            })
            .await?;
        info!(score = score.value(), "Recipe rated");
        Ok(rating)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pantry_core::models::RatingId;

    use super::*;

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("batched".parse::<FetchStrategy>().unwrap(), FetchStrategy::Batched);
        assert_eq!(
            "FAN_OUT".parse::<FetchStrategy>().unwrap(),
            FetchStrategy::FanOut {
                concurrency: DEFAULT_FAN_OUT_CONCURRENCY
            }
        );
        assert!("sequential".parse::<FetchStrategy>().is_err());
    }

    #[test]
    fn test_summaries_ignore_ratings_outside_the_key_set() {
        let wanted = RecipeId::new();
        let rating = Rating {
            id: RatingId::new(),
            user_id: UserId::new(),
            recipe_id: RecipeId::new(),
            score: Score::try_from(5).unwrap(),
            comment: None,
            created_at: Utc::now(),
        };
        let summaries = summarize_ratings(&[wanted], [rating]);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[&wanted].count, 0);
    }
}
