// ABOUTME: Case-insensitive title substring search with offset pagination
// ABOUTME: Serves both the active browse view and the trash view
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pantry_core::errors::AppResult;
use pantry_core::models::Recipe;
use pantry_core::pagination::{Page, PageRequest};
use tracing::debug;

use super::lifecycle::LifecycleManager;

/// Title filter over one lifecycle partition
#[derive(Clone)]
pub struct TitleSearch {
    lifecycle: LifecycleManager,
}

impl TitleSearch {
    /// Create a search reading through the lifecycle manager
    #[must_use]
    pub const fn new(lifecycle: LifecycleManager) -> Self {
        Self { lifecycle }
    }

    /// Active recipes whose title contains `search`, one page at a time
    ///
    /// An empty search matches every active recipe.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the active listing fails
    pub async fn search(&self, search: &str, page: PageRequest) -> AppResult<Page<Recipe>> {
        let active = self.lifecycle.list_active().await?;
        let result = paginate_by_title(active, search, page);
        debug!(
            search,
            page = result.page,
            limit = result.limit,
            total = result.total,
            "Title search"
        );
        Ok(result)
    }

    /// Trashed recipes whose title contains `search`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the trashed listing fails
    pub async fn search_trashed(&self, search: &str, page: PageRequest) -> AppResult<Page<Recipe>> {
        let trashed = self.lifecycle.list_trashed().await?;
        Ok(paginate_by_title(trashed, search, page))
    }
}

/// Filter a partition by title substring and cut one page from it
#[must_use]
pub fn paginate_by_title(recipes: Vec<Recipe>, search: &str, page: PageRequest) -> Page<Recipe> {
    let needle = search.to_lowercase();
    let matching: Vec<Recipe> = recipes
        .into_iter()
        .filter(|recipe| needle.is_empty() || recipe.title.to_lowercase().contains(&needle))
        .collect();

    Page {
        total: matching.len(),
        items: page.apply(matching),
        page: page.page,
        limit: page.limit,
    }
}
