// ABOUTME: Recipe document model with validated title and normalized ingredient set
// ABOUTME: Defines Recipe, NewRecipe, RecipeEdit and the store-level RecipePatch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::RecipeId;
use super::lifecycle::LifecycleState;
use crate::errors::{AppError, AppResult};

/// Normalize one ingredient name: trimmed, inner whitespace collapsed, lowercase
///
/// Returns `None` for blank input.
#[must_use]
pub fn normalize_ingredient(raw: &str) -> Option<String> {
    let normalized = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    (!normalized.is_empty()).then_some(normalized)
}

/// Ordered set of normalized ingredient names
///
/// Keeps the first occurrence of every name so the serialized form is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Ingredients(Vec<String>);

impl Ingredients {
    /// Build from raw names, normalizing and dropping duplicates and blanks
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let names = raw
            .into_iter()
            .filter_map(|name| normalize_ingredient(name.as_ref()))
            .filter(|name| seen.insert(name.clone()))
            .collect();
        Self(names)
    }

    /// Number of distinct ingredients
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a normalized name is in the set
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// Size of the intersection with an already normalized query set
    #[must_use]
    pub fn overlap(&self, query: &HashSet<String>) -> usize {
        self.0.iter().filter(|name| query.contains(*name)).count()
    }

    /// Iterate the names in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for Ingredients {
    fn from(raw: Vec<String>) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Ingredients> for Vec<String> {
    fn from(ingredients: Ingredients) -> Self {
        ingredients.0
    }
}

/// Non-empty recipe title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecipeTitle(String);

impl RecipeTitle {
    /// Validate a title: surrounding whitespace is trimmed and the rest must be non-empty
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` if the title is blank
    pub fn parse(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::missing_field("title"));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the title text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the owned string
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A stored recipe document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Store-assigned identifier
    pub id: RecipeId,
    /// Display title (never empty)
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Thumbnail image URL
    pub thumbnail: Option<String>,
    /// Where the recipe was found
    pub source_url: Option<String>,
    /// Normalized ingredient set
    pub ingredients: Ingredients,
    /// Lifecycle state (only `Active` or `Trashed` for a stored record)
    pub state: LifecycleState,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Whether the recipe is visible in browse, search and match results
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == LifecycleState::Active
    }
}

/// Untyped recipe payload as received at the transport boundary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRecipeRequest {
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Thumbnail image URL
    pub thumbnail: Option<String>,
    /// Source URL
    pub source_url: Option<String>,
    /// Raw ingredient names
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Validated input for creating a recipe
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    /// Validated title
    pub title: RecipeTitle,
    /// Free-form description
    pub description: String,
    /// Thumbnail image URL
    pub thumbnail: Option<String>,
    /// Source URL
    pub source_url: Option<String>,
    /// Normalized ingredient set
    pub ingredients: Ingredients,
}

impl TryFrom<CreateRecipeRequest> for NewRecipe {
    type Error = AppError;

    fn try_from(request: CreateRecipeRequest) -> AppResult<Self> {
        Ok(Self {
            title: RecipeTitle::parse(&request.title)?,
            description: request.description,
            thumbnail: non_blank(request.thumbnail),
            source_url: non_blank(request.source_url),
            ingredients: Ingredients::from_raw(request.ingredients),
        })
    }
}

/// Untyped edit payload; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecipeRequest {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New thumbnail URL
    pub thumbnail: Option<String>,
    /// New source URL
    pub source_url: Option<String>,
    /// Replacement ingredient list
    pub ingredients: Option<Vec<String>>,
}

/// Validated field edit; never touches the lifecycle state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeEdit {
    /// New title
    pub title: Option<RecipeTitle>,
    /// New description
    pub description: Option<String>,
    /// New thumbnail URL (`Some(None)` clears it)
    pub thumbnail: Option<Option<String>>,
    /// New source URL (`Some(None)` clears it)
    pub source_url: Option<Option<String>>,
    /// Replacement ingredient set
    pub ingredients: Option<Ingredients>,
}

impl RecipeEdit {
    /// Whether the edit changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.thumbnail.is_none()
            && self.source_url.is_none()
            && self.ingredients.is_none()
    }
}

impl TryFrom<UpdateRecipeRequest> for RecipeEdit {
    type Error = AppError;

    fn try_from(request: UpdateRecipeRequest) -> AppResult<Self> {
        Ok(Self {
            title: request
                .title
                .as_deref()
                .map(RecipeTitle::parse)
                .transpose()?,
            description: request.description,
            thumbnail: request.thumbnail.map(|t| non_blank(Some(t))),
            source_url: request.source_url.map(|s| non_blank(Some(s))),
            ingredients: request.ingredients.map(Ingredients::from_raw),
        })
    }
}

/// Store-level partial update applied atomically to one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipePatch {
    /// Field changes
    pub fields: RecipeEdit,
    /// New persisted lifecycle state
    pub state: Option<LifecycleState>,
}

impl RecipePatch {
    /// Patch that only moves the lifecycle state
    #[must_use]
    pub fn state(state: LifecycleState) -> Self {
        Self {
            fields: RecipeEdit::default(),
            state: Some(state),
        }
    }

    /// Patch that only edits fields
    #[must_use]
    pub fn fields(fields: RecipeEdit) -> Self {
        Self {
            fields,
            state: None,
        }
    }

    /// Apply this patch to an in-memory document
    pub fn apply_to(&self, recipe: &mut Recipe, now: DateTime<Utc>) {
        if let Some(title) = &self.fields.title {
            recipe.title = title.as_str().to_owned();
        }
        if let Some(description) = &self.fields.description {
            recipe.description.clone_from(description);
        }
        if let Some(thumbnail) = &self.fields.thumbnail {
            recipe.thumbnail.clone_from(thumbnail);
        }
        if let Some(source_url) = &self.fields.source_url {
            recipe.source_url.clone_from(source_url);
        }
        if let Some(ingredients) = &self.fields.ingredients {
            recipe.ingredients = ingredients.clone();
        }
        if let Some(state) = self.state {
            recipe.state = state;
        }
        recipe.updated_at = now;
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_ingredients_are_normalized_and_deduplicated() {
        let ingredients = Ingredients::from_raw(["Egg", " egg ", "Ground  Beef", "", "flour"]);
        let names: Vec<_> = ingredients.iter().collect();
        assert_eq!(names, vec!["egg", "ground beef", "flour"]);
    }

    #[test]
    fn test_overlap_counts_shared_names() {
        let ingredients = Ingredients::from_raw(["egg", "butter", "flour"]);
        let query: HashSet<String> = ["egg", "flour", "milk"]
            .into_iter()
            .map(str::to_owned)
            .collect();
        assert_eq!(ingredients.overlap(&query), 2);
    }

    #[test]
    fn test_deserialization_normalizes() {
        let ingredients: Ingredients = serde_json::from_str(r#"["Tofu","TOFU","rice"]"#).unwrap();
        assert_eq!(ingredients.len(), 2);
        assert!(ingredients.contains("tofu"));
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let request = CreateRecipeRequest {
            title: "   ".to_owned(),
            ..CreateRecipeRequest::default()
        };
        let error = NewRecipe::try_from(request).unwrap_err();
        assert_eq!(error.code, ErrorCode::MissingRequiredField);
    }

    #[test]
    fn test_edit_clears_blank_urls() {
        let edit = RecipeEdit::try_from(UpdateRecipeRequest {
            thumbnail: Some(String::new()),
            ..UpdateRecipeRequest::default()
        })
        .unwrap();
        assert_eq!(edit.thumbnail, Some(None));
        assert!(!edit.is_empty());
    }
}
