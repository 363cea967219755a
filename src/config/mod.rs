// ABOUTME: Configuration module for the Ladle data layer
// ABOUTME: Environment-driven settings for database location and logging

//! Configuration management
//!
//! All configuration is environment-driven; there are no config files.

pub mod environment;

pub use environment::{DatabaseConfig, DatabaseUrl, ServerConfig};
