// ABOUTME: Database location type for the SQLite recipe store
// ABOUTME: Parses DATABASE_URL into a file-backed or in-memory target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

use pantry_core::constants::defaults;
use pantry_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (tests and dry runs)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns a config error for non-SQLite schemes or an empty path
    pub fn parse_url(s: &str) -> AppResult<Self> {
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            return match path_str {
                ":memory:" => Ok(Self::Memory),
                "" => Err(AppError::config("DATABASE_URL has an empty sqlite path")),
                path => Ok(Self::SQLite {
                    path: PathBuf::from(path.trim_start_matches("//")),
                }),
            };
        }
        if s.contains("://") {
            return Err(AppError::config(format!(
                "Unsupported DATABASE_URL scheme: {s}"
            )));
        }
        if s.is_empty() {
            return Err(AppError::config("DATABASE_URL is empty"));
        }
        // Bare path: treat as SQLite file
        Ok(Self::SQLite {
            path: PathBuf::from(s),
        })
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from(
                defaults::DATABASE_URL
                    .strip_prefix("sqlite:")
                    .unwrap_or(defaults::DATABASE_URL),
            ),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::errors::ErrorCode;

    #[test]
    fn test_memory_url() {
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:").unwrap(),
            DatabaseUrl::Memory
        );
    }

    #[test]
    fn test_file_url_round_trips() {
        let url = DatabaseUrl::parse_url("sqlite:./data/recipes.db").unwrap();
        assert_eq!(url.to_connection_string(), "sqlite:./data/recipes.db");
        assert_eq!(url, DatabaseUrl::default());
    }

    #[test]
    fn test_rejects_other_schemes() {
        let error = DatabaseUrl::parse_url("postgres://localhost/recipes").unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigError);
    }
}
