// ABOUTME: Database management for the Ladle data layer
// ABOUTME: Connection setup, schema migration fan-out, shared pool access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

//! # Database Management
//!
//! This module provides the storage layer for the recipe platform. It owns
//! the connection pool, runs schema migrations at startup, and exposes the
//! per-entity stores as `impl Database` blocks in the submodules.
//!
//! Uniqueness and referential integrity are enforced by the engine: every
//! edge table declares `UNIQUE` pairs and `ON DELETE CASCADE` foreign keys,
//! and foreign-key enforcement is switched on for every pooled connection.

mod catalog;
mod recipes;
mod relations;
mod short_links;
mod subscriptions;
mod users;

pub use short_links::generate_hash;

use crate::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, SqlitePool};
use std::str::FromStr;

/// Database manager for the recipe platform stores
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or a migration
    /// fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("invalid database url: {e}")).with_source(e))?
            .create_if_missing(true)
            // SQLite does not enforce foreign keys unless asked per connection
            .foreign_keys(true);

        // An in-memory database exists per connection, so the pool must not
        // open a second one
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect_with(options)
                .await
        } else {
            SqlitePool::connect_with(options).await
        }
        .map_err(|e| AppError::database(format!("failed to open database: {e}")).with_source(e))?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        // Identity tables
        self.migrate_users().await?;
        self.migrate_subscriptions().await?;

        // Catalog tables
        self.migrate_catalog().await?;

        // Recipe tables and their edges
        self.migrate_recipes().await?;
        self.migrate_relations().await?;

        // Short link table
        self.migrate_short_links().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) async fn create_test_db() -> AppResult<Database> {
        // Each in-memory connection is its own isolated instance
        Database::new("sqlite::memory:").await
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = create_test_db().await.unwrap();
        db.migrate().await.unwrap();
    }
}
