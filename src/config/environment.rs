// ABOUTME: Environment configuration for the recipe server
// ABOUTME: Reads ports, database location, pagination and rating fetch settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration; there is no config file.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use pantry_core::constants::{defaults, pagination, ratings};
use pantry_core::errors::{AppError, AppResult};
use tracing::info;

use super::database::DatabaseUrl;
use crate::retrieval::FetchStrategy;

/// Server configuration loaded once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Where recipes are stored
    pub database_url: DatabaseUrl,
    /// Page size used when a request gives none (or an unusable one)
    pub default_page_limit: u32,
    /// How rating summaries are fetched
    pub rating_fetch: FetchStrategy,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// Allowed CORS origins (`*` for any)
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            database_url: DatabaseUrl::default(),
            default_page_limit: pagination::DEFAULT_LIMIT,
            rating_fetch: FetchStrategy::Batched,
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
            cors_allowed_origins: vec!["*".to_owned()],
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let strategy: FetchStrategy = env_var_or("RATING_FETCH_STRATEGY", "batched").parse()?;
        let rating_fetch = match strategy {
            FetchStrategy::Batched => FetchStrategy::Batched,
            FetchStrategy::FanOut { .. } => FetchStrategy::FanOut {
                concurrency: parse_positive(
                    "RATING_FAN_OUT_CONCURRENCY",
                    ratings::DEFAULT_FAN_OUT_CONCURRENCY,
                )?,
            },
        };

        Ok(Self {
            http_port: parse_positive("HTTP_PORT", defaults::HTTP_PORT)?,
            database_url: DatabaseUrl::parse_url(&env_var_or(
                "DATABASE_URL",
                defaults::DATABASE_URL,
            ))?,
            default_page_limit: parse_positive("DEFAULT_PAGE_LIMIT", pagination::DEFAULT_LIMIT)?,
            rating_fetch,
            request_timeout_secs: parse_positive(
                "REQUEST_TIMEOUT_SECS",
                defaults::REQUEST_TIMEOUT_SECS,
            )?,
            cors_allowed_origins: parse_origins(&env_var_or("CORS_ALLOWED_ORIGINS", "*")),
        })
    }

    /// Whether any origin may call the API
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Pantry Recipes Configuration:\n\
             - HTTP Port: {}\n\
             - Database: {}\n\
             - Default Page Limit: {}\n\
             - Rating Fetch: {}\n\
             - Request Timeout: {}s\n\
             - CORS Origins: {}",
            self.http_port,
            if self.database_url.is_memory() {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            self.default_page_limit,
            self.rating_fetch,
            self.request_timeout_secs,
            self.cors_allowed_origins.join(", "),
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse a numeric variable that must be at least 1
fn parse_positive<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr + PartialOrd + From<u8> + Copy,
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };
    let value: T = raw
        .trim()
        .parse()
        .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}")))?;
    if value < T::from(1) {
        return Err(AppError::config(format!("{key} must be at least 1, got '{raw}'")));
    }
    Ok(value)
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        return vec!["*".to_owned()];
    }
    origins_str
        .split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}
