// ABOUTME: Structured error types for recipe, rating and favorite store backends
// ABOUTME: Provides StoreError with context and its conversion into AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};

/// Failure raised by a store backend
///
/// Stores never return "not found" as an error: lookups return `Option` and
/// the retrieval engine decides whether absence is a `NotFound`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached
    #[error("Store connection failed: {context}")]
    Connection {
        /// What was being attempted
        context: String,
    },

    /// A read or write against the backend failed
    #[error("Store query failed: {context}")]
    Query {
        /// What was being attempted
        context: String,
    },

    /// A stored document could not be decoded
    #[error("Stored {entity} could not be decoded: {reason}")]
    Serialization {
        /// Entity kind (recipe, rating, ...)
        entity: &'static str,
        /// Decoder message
        reason: String,
    },

    /// The backend rejected a write because of a constraint
    #[error("Store constraint violated: {context}")]
    Constraint {
        /// Constraint description
        context: String,
    },
}

impl StoreError {
    /// Build a query error from any displayable cause
    #[must_use]
    pub fn query(context: impl Into<String>) -> Self {
        Self::Query {
            context: context.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        let code = match &error {
            StoreError::Serialization { .. } => ErrorCode::SerializationError,
            StoreError::Connection { .. }
            | StoreError::Query { .. }
            | StoreError::Constraint { .. } => ErrorCode::StorageError,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Connection {
                    context: error.to_string(),
                }
            }
            sqlx::Error::Database(ref db)
                if db.is_check_violation()
                    || db.is_unique_violation()
                    || db.is_foreign_key_violation() =>
            {
                Self::Constraint {
                    context: db.message().to_owned(),
                }
            }
            other => Self::Query {
                context: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_store_errors_classify_as_store() {
        let error: AppError = StoreError::query("select recipes").into();
        assert_eq!(error.code, ErrorCode::StorageError);
        assert_eq!(error.kind(), ErrorKind::Store);

        let error: AppError = StoreError::Serialization {
            entity: "recipe",
            reason: "bad json".to_owned(),
        }
        .into();
        assert_eq!(error.code, ErrorCode::SerializationError);
        assert_eq!(error.kind(), ErrorKind::Store);
    }
}
