// ABOUTME: Integration tests for the short link store
// ABOUTME: Hash shape, collision retry, exhaustion, lookup by hash
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use common::create_test_db;
use ladle::constants::short_links::{HASH_LENGTH_MAX, HASH_LENGTH_MIN};
use ladle::errors::classify_sqlx_error;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// A random source with no entropy: every draw lands on the range minimum,
/// so every generated hash is identical
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        dest.fill(0);
        Ok(())
    }
}

#[tokio::test]
async fn test_create_short_link() {
    let db = create_test_db().await;
    let mut rng = StdRng::seed_from_u64(1);

    let link = db
        .create_short_link("https://ladle.example/recipes/1", &mut rng)
        .await
        .unwrap();
    assert!(link.url_hash.len() >= HASH_LENGTH_MIN && link.url_hash.len() <= HASH_LENGTH_MAX);
    assert!(link.url_hash.chars().all(|c| c.is_ascii_alphanumeric()));

    let found = db
        .get_short_link_by_hash(&link.url_hash)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.original_url, "https://ladle.example/recipes/1");
}

#[tokio::test]
async fn test_same_url_gets_distinct_hashes() {
    let db = create_test_db().await;
    let mut rng = StdRng::seed_from_u64(2);

    let first = db
        .create_short_link("https://ladle.example/recipes/1", &mut rng)
        .await
        .unwrap();
    let second = db
        .create_short_link("https://ladle.example/recipes/1", &mut rng)
        .await
        .unwrap();
    assert_ne!(first.url_hash, second.url_hash);
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_url_validation() {
    let db = create_test_db().await;
    let mut rng = StdRng::seed_from_u64(3);

    assert!(db
        .create_short_link("", &mut rng)
        .await
        .unwrap_err()
        .is_validation());

    let long_url = format!("https://ladle.example/{}", "a".repeat(300));
    assert!(db
        .create_short_link(&long_url, &mut rng)
        .await
        .unwrap_err()
        .is_validation());
}

#[tokio::test]
async fn test_duplicate_hash_insert_is_constraint_violation() {
    let db = create_test_db().await;
    let mut rng = StdRng::seed_from_u64(4);

    let link = db
        .create_short_link("https://ladle.example/recipes/1", &mut rng)
        .await
        .unwrap();

    // Force the collision the retry loop guards against
    let err = sqlx::query(
        "INSERT INTO short_links (original_url, url_hash, created_at) VALUES ($1, $2, $3)",
    )
    .bind("https://ladle.example/recipes/2")
    .bind(&link.url_hash)
    .bind(chrono::Utc::now())
    .execute(db.pool())
    .await
    .map_err(|e| classify_sqlx_error(e, "create short link"))
    .unwrap_err();
    assert!(err.is_constraint_violation());
}

#[tokio::test]
async fn test_collision_retries_exhaust_with_dedicated_error() {
    let db = create_test_db().await;

    // With zero entropy every attempt generates the same hash
    let first = db
        .create_short_link("https://ladle.example/recipes/1", &mut ZeroRng)
        .await
        .unwrap();
    assert_eq!(first.url_hash.len(), HASH_LENGTH_MIN);

    let err = db
        .create_short_link("https://ladle.example/recipes/2", &mut ZeroRng)
        .await
        .unwrap_err();
    assert_eq!(err.code, ladle::errors::ErrorCode::HashSpaceExhausted);

    // Only the first link was stored
    assert_eq!(db.list_short_links().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_newest_first_and_delete() {
    let db = create_test_db().await;
    let mut rng = StdRng::seed_from_u64(5);

    let a = db
        .create_short_link("https://ladle.example/a", &mut rng)
        .await
        .unwrap();
    let b = db
        .create_short_link("https://ladle.example/b", &mut rng)
        .await
        .unwrap();

    let ids: Vec<i64> = db
        .list_short_links()
        .await
        .unwrap()
        .iter()
        .map(|l| l.id)
        .collect();
    assert_eq!(ids, vec![b.id, a.id]);

    db.delete_short_link(a.id).await.unwrap();
    assert!(db.delete_short_link(a.id).await.unwrap_err().is_not_found());
    assert!(db
        .get_short_link_by_hash_required(&a.url_hash)
        .await
        .unwrap_err()
        .is_not_found());
}
