// ABOUTME: Application constants for recipe retrieval, pagination, and ratings
// ABOUTME: Centralizes defaults shared by the core engine, config layer, and routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Service identification
pub mod service_names {
    /// Service name used in structured logs
    pub const PANTRY_SERVER: &str = "pantry-server";
}

/// Pagination defaults for browse and trash views
pub mod pagination {
    /// First page index (pages are 1-based)
    pub const DEFAULT_PAGE: u32 = 1;
    /// Page size when the caller does not provide a usable limit
    pub const DEFAULT_LIMIT: u32 = 20;
}

/// Rating score bounds
pub mod ratings {
    /// Lowest accepted score
    pub const MIN_SCORE: u8 = 1;
    /// Highest accepted score
    pub const MAX_SCORE: u8 = 5;
    /// Default number of concurrent per-recipe fetches in fan-out mode
    pub const DEFAULT_FAN_OUT_CONCURRENCY: usize = 8;
}

/// Server defaults
pub mod defaults {
    /// HTTP listen port
    pub const HTTP_PORT: u16 = 5000;
    /// Default SQLite database location
    pub const DATABASE_URL: &str = "sqlite:./data/recipes.db";
    /// Request timeout applied to every route
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Maximum accepted request body size
    pub const MAX_BODY_BYTES: usize = 256 * 1024;
}
