// ABOUTME: Main library entry point for the Ladle recipe platform data layer
// ABOUTME: Exposes the stores, models, errors, config, and logging modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

#![deny(unsafe_code)]

//! # Ladle
//!
//! The data layer of a recipe-sharing platform: users, subscriptions, tags,
//! ingredients, recipes, favorites, shopping carts, and a URL-shortening
//! helper.
//!
//! Every store is a set of async operations on a shared `SQLite` pool.
//! Uniqueness and referential integrity live in the schema (`UNIQUE`,
//! `CHECK`, cascading foreign keys), so concurrent duplicate writes resolve
//! in the engine: one insert succeeds, the other surfaces a
//! constraint-violation error the caller is expected to handle.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ladle::database::Database;
//! use ladle::models::CreateUserRequest;
//!
//! #[tokio::main]
//! async fn main() -> ladle::errors::AppResult<()> {
//!     let db = Database::new("sqlite:data/ladle.db").await?;
//!     let user = db
//!         .create_user(&CreateUserRequest {
//!             email: "alice@example.com".into(),
//!             username: "alice".into(),
//!             first_name: "Alice".into(),
//!             last_name: "Liddell".into(),
//!         })
//!         .await?;
//!     println!("created user {}", user.id);
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Database stores and schema migrations
pub mod database;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Data models and write-request types
pub mod models;
