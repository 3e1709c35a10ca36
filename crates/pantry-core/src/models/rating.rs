// ABOUTME: Rating and favorite models with validated 1-5 score
// ABOUTME: Defines Rating, NewRating, RatingSummary and Favorite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ids::{RatingId, RecipeId, UserId};
use crate::constants::ratings::{MAX_SCORE, MIN_SCORE};
use crate::errors::AppError;

/// Rating score, always within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    /// The numeric value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = AppError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        u8::try_from(raw)
            .ok()
            .filter(|v| (MIN_SCORE..=MAX_SCORE).contains(v))
            .map(Self)
            .ok_or_else(|| {
                AppError::out_of_range(format!(
                    "Score must be between {MIN_SCORE} and {MAX_SCORE}, got {raw}"
                ))
            })
    }
}

impl TryFrom<&Value> for Score {
    type Error = AppError;

    /// Validate an untyped JSON score; only whole numbers in range are accepted
    fn try_from(raw: &Value) -> Result<Self, Self::Error> {
        raw.as_i64().map_or_else(
            || {
                Err(AppError::out_of_range(format!(
                    "Score must be a whole number between {MIN_SCORE} and {MAX_SCORE}, got {raw}"
                )))
            },
            Self::try_from,
        )
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

/// A user's immutable rating of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Unique identifier
    pub id: RatingId,
    /// Who rated
    pub user_id: UserId,
    /// What was rated
    pub recipe_id: RecipeId,
    /// Score in 1..=5
    pub score: Score,
    /// Optional free-text comment
    pub comment: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a rating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRating {
    /// Who rates
    pub user_id: UserId,
    /// What is rated
    pub recipe_id: RecipeId,
    /// Score in 1..=5
    pub score: Score,
    /// Optional free-text comment
    pub comment: Option<String>,
}

/// Average score and rating count for one recipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RatingSummary {
    /// Mean score, 0 when there are no ratings
    pub average: f64,
    /// Number of ratings
    pub count: u32,
}

impl RatingSummary {
    /// Summarize a set of scores; an empty set yields `{0, 0}`
    pub fn from_scores(scores: impl IntoIterator<Item = Score>) -> Self {
        let (sum, count) = scores
            .into_iter()
            .fold((0_u64, 0_u32), |(sum, count), score| {
                (sum + u64::from(score.value()), count + 1)
            });
        if count == 0 {
            return Self::default();
        }
        Self {
            average: sum as f64 / f64::from(count),
            count,
        }
    }
}

/// A user's favorite recipe (set semantics on the pair)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// Who favorited
    pub user_id: UserId,
    /// What was favorited
    pub recipe_id: RecipeId,
    /// When it was first favorited
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        assert!(Score::try_from(0).is_err());
        assert!(Score::try_from(6).is_err());
        assert!(Score::try_from(-1).is_err());
        assert_eq!(Score::try_from(5).unwrap().value(), 5);
    }

    #[test]
    fn test_score_deserialization_validates() {
        assert!(serde_json::from_str::<Score>("7").is_err());
        assert_eq!(serde_json::from_str::<Score>("3").unwrap().value(), 3);
    }

    #[test]
    fn test_json_score_must_be_whole_number() {
        assert_eq!(Score::try_from(&Value::from(4)).unwrap().value(), 4);
        assert!(Score::try_from(&Value::from(4.5)).is_err());
        assert!(Score::try_from(&Value::from("4")).is_err());
        assert!(Score::try_from(&Value::Null).is_err());
    }

    #[test]
    fn test_summary_of_no_scores_is_zero() {
        let summary = RatingSummary::from_scores([]);
        assert_eq!(summary.count, 0);
        assert!(summary.average.abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_average() {
        let scores = [4, 5].map(|s| Score::try_from(s).unwrap());
        let summary = RatingSummary::from_scores(scores);
        assert_eq!(summary.count, 2);
        assert!((summary.average - 4.5).abs() < f64::EPSILON);
    }
}
