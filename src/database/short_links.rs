// ABOUTME: Short link store with collision-aware hash generation
// ABOUTME: Bounded-retry inserts against the unique hash column
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

use super::Database;
use crate::constants::short_links::{
    HASH_ALPHABET, HASH_FIELD_LENGTH, HASH_LENGTH_MAX, HASH_LENGTH_MIN, HASH_MAX_ATTEMPTS,
    URL_MAX_LENGTH,
};
use crate::errors::{classify_sqlx_error, AppError, AppResult};
use crate::models::ShortLink;
use chrono::Utc;
use rand::Rng;
use sqlx::Row;

/// Generate a short link hash token
///
/// The length is drawn uniformly from the configured inclusive range, then
/// each character is drawn independently and uniformly from the 62-symbol
/// alphabet of ASCII letters and digits. The random source is explicit so
/// tests can pass a seeded generator.
pub fn generate_hash<R: Rng>(rng: &mut R) -> String {
    let length = rng.gen_range(HASH_LENGTH_MIN..=HASH_LENGTH_MAX);
    (0..length)
        .map(|_| char::from(HASH_ALPHABET[rng.gen_range(0..HASH_ALPHABET.len())]))
        .collect()
}

impl Database {
    /// Create the short links table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_short_links(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS short_links (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                original_url TEXT NOT NULL,
                url_hash TEXT UNIQUE NOT NULL,
                created_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "migrate short links"))?;

        Ok(())
    }

    /// Create a short link for `original_url` with a freshly generated hash
    ///
    /// Generation is not collision-free, so the insert runs a bounded retry
    /// loop: a unique-violation regenerates the hash, anything else fails
    /// immediately, and once the attempts are spent the dedicated
    /// exhaustion error is returned.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the URL is empty or too long, and a
    /// hash-space-exhausted error if no unique hash was found within
    /// the configured attempts
    pub async fn create_short_link<R: Rng>(
        &self,
        original_url: &str,
        rng: &mut R,
    ) -> AppResult<ShortLink> {
        if original_url.trim().is_empty() {
            return Err(AppError::invalid_input("original_url must not be empty"));
        }
        if original_url.chars().count() > URL_MAX_LENGTH {
            return Err(AppError::out_of_range(format!(
                "original_url exceeds maximum length of {URL_MAX_LENGTH} characters"
            )));
        }

        for attempt in 1..=HASH_MAX_ATTEMPTS {
            let url_hash = generate_hash(rng);
            debug_assert!(url_hash.len() <= HASH_FIELD_LENGTH);
            let created_at = Utc::now();

            let result = sqlx::query(
                "INSERT INTO short_links (original_url, url_hash, created_at) VALUES ($1, $2, $3)",
            )
            .bind(original_url)
            .bind(&url_hash)
            .bind(created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "create short link"));

            match result {
                Ok(done) => {
                    return Ok(ShortLink {
                        id: done.last_insert_rowid(),
                        original_url: original_url.to_owned(),
                        url_hash,
                        created_at,
                    });
                }
                Err(e) if e.is_constraint_violation() => {
                    tracing::debug!(attempt, url_hash, "short link hash collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::hash_space_exhausted(HASH_MAX_ATTEMPTS))
    }

    /// Look up a short link by its hash token
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_short_link_by_hash(&self, url_hash: &str) -> AppResult<Option<ShortLink>> {
        let row = sqlx::query(
            "SELECT id, original_url, url_hash, created_at FROM short_links WHERE url_hash = $1",
        )
        .bind(url_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "get short link"))?;

        Ok(row.map(|r| row_to_short_link(&r)))
    }

    /// Look up a short link by its hash token, returning an error if absent
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no link has this hash
    pub async fn get_short_link_by_hash_required(&self, url_hash: &str) -> AppResult<ShortLink> {
        self.get_short_link_by_hash(url_hash)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Short link {url_hash}")))
    }

    /// List short links newest-first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_short_links(&self) -> AppResult<Vec<ShortLink>> {
        let rows = sqlx::query(
            "SELECT id, original_url, url_hash, created_at FROM short_links ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "list short links"))?;

        Ok(rows.iter().map(row_to_short_link).collect())
    }

    /// Delete a short link
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the link does not exist
    pub async fn delete_short_link(&self, short_link_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM short_links WHERE id = $1")
            .bind(short_link_id)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "delete short link"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Short link {short_link_id}")));
        }
        Ok(())
    }
}

fn row_to_short_link(row: &sqlx::sqlite::SqliteRow) -> ShortLink {
    ShortLink {
        id: row.get("id"),
        original_url: row.get("original_url"),
        url_hash: row.get("url_hash"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_hash_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let hash = generate_hash(&mut rng);
            assert!(hash.len() >= HASH_LENGTH_MIN && hash.len() <= HASH_LENGTH_MAX);
            assert!(hash.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(generate_hash(&mut a), generate_hash(&mut b));
    }
}
