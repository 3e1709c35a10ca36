// ABOUTME: SQLite connection management and schema migrations for the recipe store
// ABOUTME: Owns the pool and hands out recipe, rating and favorite repositories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! The pool is configured with foreign keys enabled so that purging a recipe
//! cascades to its ratings and favorites. In-memory databases are pinned to a
//! single connection because every `SQLite` memory connection is its own
//! database. File databases run in WAL mode with a busy timeout, and every
//! recipe write is a single statement, so concurrent writers queue instead
//! of failing.

/// Store traits and their `SQLite` and in-memory implementations
pub mod repositories;
/// User accounts with hashed credentials
pub mod users;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use pantry_core::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::DatabaseUrl;
use repositories::{
    FavoriteStore, RatingStore, RecipeStore, SqliteFavoriteStore, SqliteRatingStore,
    SqliteRecipeStore,
};
pub use users::UsersManager;

/// Connections allowed for a file-backed database
const FILE_POOL_SIZE: u32 = 8;

/// How long a writer waits for the database lock before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database handle shared by the stores
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a migration fails
    pub async fn connect(url: &DatabaseUrl) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&url.to_connection_string())
            .map_err(|e| AppError::config(format!("Invalid database URL {url}: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        // An in-memory database lives only as long as its single connection
        let (pool_options, options) = if url.is_memory() {
            let pool_options = SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
            (pool_options, options)
        } else {
            let pool_options = SqlitePoolOptions::new().max_connections(FILE_POOL_SIZE);
            (pool_options, options.journal_mode(SqliteJournalMode::Wal))
        };
        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {url}: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Recipe store over this database
    #[must_use]
    pub fn recipe_store(&self) -> Arc<dyn RecipeStore> {
        Arc::new(SqliteRecipeStore::new(self.pool.clone()))
    }

    /// Rating store over this database
    #[must_use]
    pub fn rating_store(&self) -> Arc<dyn RatingStore> {
        Arc::new(SqliteRatingStore::new(self.pool.clone()))
    }

    /// Favorite store over this database
    #[must_use]
    pub fn favorite_store(&self) -> Arc<dyn FavoriteStore> {
        Arc::new(SqliteFavoriteStore::new(self.pool.clone()))
    }

    /// User manager over this database
    #[must_use]
    pub fn users(&self) -> UsersManager {
        UsersManager::new(self.pool.clone())
    }

    /// Create all tables if they do not exist
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_recipes().await?;
        self.migrate_ratings().await?;
        self.migrate_favorites().await?;
        Ok(())
    }

    async fn migrate_users(&self) -> AppResult<()> {
        self.execute_schema(
            "users",
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .await
    }

    async fn migrate_recipes(&self) -> AppResult<()> {
        self.execute_schema(
            "recipes",
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT UNIQUE NOT NULL,
                title TEXT NOT NULL CHECK (length(title) > 0),
                description TEXT NOT NULL DEFAULT '',
                thumbnail TEXT,
                source_url TEXT,
                ingredients TEXT NOT NULL DEFAULT '[]',
                is_trashed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .await?;
        self.execute_schema(
            "recipes",
            "CREATE INDEX IF NOT EXISTS idx_recipes_is_trashed ON recipes(is_trashed, seq)",
        )
        .await
    }

    async fn migrate_ratings(&self) -> AppResult<()> {
        self.execute_schema(
            "ratings",
            r"
            CREATE TABLE IF NOT EXISTS ratings (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                score INTEGER NOT NULL CHECK (score BETWEEN 1 AND 5),
                comment TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .await?;
        self.execute_schema(
            "ratings",
            "CREATE INDEX IF NOT EXISTS idx_ratings_recipe_id ON ratings(recipe_id)",
        )
        .await
    }

    async fn migrate_favorites(&self) -> AppResult<()> {
        self.execute_schema(
            "favorites",
            r"
            CREATE TABLE IF NOT EXISTS favorites (
                user_id TEXT NOT NULL,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, recipe_id)
            )
            ",
        )
        .await
    }

    async fn execute_schema(&self, table: &str, statement: &str) -> AppResult<()> {
        sqlx::query(statement)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to migrate {table}: {e}")))?;
        Ok(())
    }
}
