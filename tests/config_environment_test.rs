// ABOUTME: Environment configuration tests
// ABOUTME: DATABASE_URL parsing with env var overrides, serialized per test
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

#![allow(missing_docs, clippy::unwrap_used)]

use ladle::config::{DatabaseUrl, ServerConfig};
use serial_test::serial;
use std::env;

#[test]
#[serial]
fn test_defaults_without_env() {
    env::remove_var("DATABASE_URL");
    env::remove_var("LOG_LEVEL");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(
        config.database.url.to_connection_string(),
        "sqlite:data/ladle.db"
    );
    assert_eq!(config.log_level, "info");
}

#[test]
#[serial]
fn test_env_overrides() {
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("LOG_LEVEL", "debug");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.database.url, DatabaseUrl::Memory);
    assert_eq!(config.log_level, "debug");

    env::remove_var("DATABASE_URL");
    env::remove_var("LOG_LEVEL");
}
