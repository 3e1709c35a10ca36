// ABOUTME: Main library entry point for the Pantry recipe retrieval server
// ABOUTME: Exposes the retrieval engine, persistence, configuration and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pantry Recipes
//!
//! A recipe catalogue with ingredient-overlap matching, paginated title
//! search, a soft-delete lifecycle, and rating aggregation.
//!
//! ## Architecture
//!
//! - **Retrieval**: lifecycle manager, ingredient matcher, title search and
//!   rating aggregator composed behind [`retrieval::RetrievalFacade`]
//! - **Database**: `SQLite` repositories plus in-memory stores for tests
//! - **Routes**: the axum HTTP surface
//! - **Config**: environment-only configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pantry_recipes::config::ServerConfig;
//! use pantry_recipes::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Pantry server configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Persistence: `SQLite` schema, repositories and user accounts
pub mod database;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Shared state handed to HTTP handlers
pub mod resources;

/// Recipe retrieval engine
pub mod retrieval;

/// HTTP routes
pub mod routes;

pub use pantry_core::{constants, errors, models, pagination};
