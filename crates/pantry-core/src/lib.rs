// ABOUTME: Core types and constants for the Pantry recipe retrieval platform
// ABOUTME: Foundation crate with error handling, domain models, pagination, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pantry Core
//!
//! Foundation crate providing shared types and constants for the Pantry recipe
//! retrieval engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `StoreError`
//! - **constants**: Application-wide constants organized by domain
//! - **pagination**: Page/limit pagination with lenient parsing
//! - **models**: Recipe, rating, favorite and user reference types

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and configuration values organized by domain
pub mod constants;

/// Offset pagination for title search and trash views
pub mod pagination;

/// Core data models (Recipe, Rating, Favorite, lifecycle state)
pub mod models;
