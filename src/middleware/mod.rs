// ABOUTME: HTTP middleware for the recipe API
// ABOUTME: CORS policy construction from configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Cross-origin request policy
pub mod cors;

pub use cors::setup_cors;
