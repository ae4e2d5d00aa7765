// ABOUTME: Database URL configuration for SQLite file and in-memory connections
// ABOUTME: Rejects server databases since the seeders only target SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

use crate::constants::defaults;

/// Type-safe database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for `PostgreSQL` URLs or an empty path
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let trimmed = s.trim();
        if trimmed.starts_with("postgresql://") || trimmed.starts_with("postgres://") {
            return Err(AppError::config_invalid(
                "PostgreSQL is not supported, use a sqlite: URL",
            ));
        }

        let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
        let path_str = path_str.strip_prefix("//").unwrap_or(path_str);
        if path_str == ":memory:" {
            return Ok(Self::Memory);
        }
        if path_str.is_empty() {
            return Err(AppError::config_invalid("database path must not be empty"));
        }
        Ok(Self::SQLite {
            path: PathBuf::from(path_str),
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
    use crate::errors::ErrorCode;

    #[test]
    fn test_parse_memory_and_file_urls() {
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:").ok(),
            Some(DatabaseUrl::Memory)
        );
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/memo.db").ok(),
            Some(DatabaseUrl::SQLite {
                path: PathBuf::from("./data/memo.db")
            })
        );
        assert_eq!(
            DatabaseUrl::parse_url("/tmp/memo.db").ok(),
            Some(DatabaseUrl::SQLite {
                path: PathBuf::from("/tmp/memo.db")
            })
        );
    }

    #[test]
    fn test_postgres_rejected() {
        let error = DatabaseUrl::parse_url("postgres://localhost/memo").err();
        assert_eq!(error.map(|e| e.code), Some(ErrorCode::ConfigInvalid));
    }

    #[test]
    fn test_default_matches_constant() {
        assert_eq!(
            DatabaseUrl::default().to_connection_string(),
            defaults::DATABASE_URL
        );
    }
}
