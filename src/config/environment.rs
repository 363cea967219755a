// ABOUTME: Environment-based server configuration
// ABOUTME: Database URL parsing and validated settings loaded from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

use crate::constants::env_config;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// Type-safe database location
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
    /// Returns an error if the URL is empty
    pub fn parse_url(s: &str) -> AppResult<Self> {
        if s.is_empty() {
            return Err(AppError::config("DATABASE_URL must not be empty"));
        }
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Ok(Self::Memory)
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            })
        }
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
            path: PathBuf::from("data/ladle.db"),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Database settings
    pub database: DatabaseConfig,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is set but invalid
    pub fn from_env() -> AppResult<Self> {
        let url = DatabaseUrl::parse_url(&env_config::database_url())?;
        Ok(Self {
            database: DatabaseConfig { url },
            log_level: env_config::log_level(),
        })
    }
}
