// ABOUTME: Configuration module for the recipe server
// ABOUTME: Environment-driven settings plus the typed database location
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Database location parsing
pub mod database;
/// Environment and server configuration
pub mod environment;

pub use database::DatabaseUrl;
pub use environment::ServerConfig;
