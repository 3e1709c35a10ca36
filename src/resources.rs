// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Wires the retrieval facade and services over one database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use pantry_core::pagination::PageRequest;

use crate::config::ServerConfig;
use crate::database::{Database, UsersManager};
use crate::retrieval::{FavoritesService, RatingService, RetrievalFacade};

/// Everything a request handler needs, built once at startup
#[derive(Clone)]
pub struct ServerResources {
    /// Recipe retrieval and lifecycle
    pub retrieval: RetrievalFacade,
    /// Rating creation
    pub ratings: RatingService,
    /// Favorites bookkeeping
    pub favorites: FavoritesService,
    /// Registered users
    pub users: UsersManager,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Build resources over an open database
    #[must_use]
    pub fn new(database: &Database, config: Arc<ServerConfig>) -> Self {
        let retrieval = RetrievalFacade::new(
            database.recipe_store(),
            database.rating_store(),
            config.rating_fetch,
        );
        let lifecycle = retrieval.lifecycle().clone();
        Self {
            ratings: RatingService::new(lifecycle.clone(), database.rating_store()),
            favorites: FavoritesService::new(lifecycle, database.favorite_store()),
            users: database.users(),
            retrieval,
            config,
        }
    }

    /// Lenient page request using the configured default limit
    #[must_use]
    pub fn page_request(&self, page: Option<&str>, limit: Option<&str>) -> PageRequest {
        PageRequest::parse_lenient(page, limit, self.config.default_page_limit)
    }
}
