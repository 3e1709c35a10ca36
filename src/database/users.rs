// ABOUTME: User account storage with bcrypt-hashed credentials
// ABOUTME: Registration hashes, login verifies the hash off the async executor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use pantry_core::errors::{AppError, AppResult, StoreError};
use pantry_core::models::{User, UserId};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tokio::task;
use tracing::{info, warn};

/// Manager for registered users
#[derive(Clone)]
pub struct UsersManager {
    pool: SqlitePool,
    bcrypt_cost: u32,
}

impl UsersManager {
    /// Create a manager over an already migrated pool
    ///
    /// Debug builds use the minimum bcrypt cost.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        let bcrypt_cost = if cfg!(debug_assertions) {
            4
        } else {
            bcrypt::DEFAULT_COST
        };
        Self { pool, bcrypt_cost }
    }

    /// Register a user, storing only the bcrypt hash of the password
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed email or empty password,
    /// `ResourceAlreadyExists` if the email is taken, or a storage error
    pub async fn create_user(&self, email: &str, password: &str) -> AppResult<User> {
        let email = normalize_email(email)?;
        if password.is_empty() {
            return Err(AppError::missing_field("password"));
        }
        if self.get_by_email(&email).await?.is_some() {
            return Err(AppError::already_exists(format!("User {email}")));
        }

        let password = password.to_owned();
        let cost = self.bcrypt_cost;
        let password_hash = task::spawn_blocking(move || bcrypt::hash(&password, cost))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Password hashing error: {e}")))?;

        let user = User {
            id: UserId::new(),
            email,
            password_hash,
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO users (id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match StoreError::from(e) {
            StoreError::Constraint { .. } => {
                AppError::already_exists(format!("User {}", user.email))
            }
            other => other.into(),
        })?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Look up a user by email (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from)?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Look up a user by id
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails
    pub async fn get(&self, id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from)?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Check a login attempt against the stored hash
    ///
    /// Unknown emails and wrong passwords produce the same error.
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` if the credentials do not match
    pub async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let Some(user) = self.get_by_email(email).await? else {
            warn!("Login attempt for unknown email");
            return Err(AppError::auth_invalid("Invalid email or password"));
        };

        let password = password.to_owned();
        let password_hash = user.password_hash.clone();
        let is_valid =
            task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
                .await
                .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            warn!(user_id = %user.id, "Invalid password");
            return Err(AppError::auth_invalid("Invalid email or password"));
        }
        Ok(user)
    }
}

fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::missing_field("email"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AppError::invalid_input(format!("Invalid email address: {raw}"))),
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id_str: String = row.try_get("id").map_err(StoreError::from)?;
    let created_at_str: String = row.try_get("created_at").map_err(StoreError::from)?;

    Ok(User {
        id: id_str
            .parse()
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        email: row.try_get("email").map_err(StoreError::from)?,
        password_hash: row.try_get("password_hash").map_err(StoreError::from)?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalization() {
        assert_eq!(
            normalize_email("  Cook@Example.COM ").unwrap(),
            "cook@example.com"
        );
        assert!(normalize_email("not-an-email").is_err());
        assert!(normalize_email("").is_err());
    }
}
