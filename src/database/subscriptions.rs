// ABOUTME: Subscription edge database operations
// ABOUTME: Users following authors, with self-subscription and duplicate guards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

use super::Database;
use crate::errors::{classify_sqlx_error, AppError, AppResult};
use crate::models::{Subscription, User};
use chrono::Utc;

impl Database {
    /// Create the subscriptions table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_subscriptions(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS subscriptions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at DATETIME NOT NULL,
                UNIQUE(user_id, author_id),
                CHECK(user_id <> author_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "migrate subscriptions"))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_subscriptions_author ON subscriptions(author_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "migrate subscriptions"))?;

        Ok(())
    }

    /// Subscribe `user_id` to `author_id`
    ///
    /// # Errors
    ///
    /// Returns a constraint-violation error on self-subscription or a
    /// duplicate pair, and a not-found error if either endpoint is missing
    pub async fn subscribe(&self, user_id: i64, author_id: i64) -> AppResult<Subscription> {
        if user_id == author_id {
            return Err(AppError::constraint_violation(
                "users cannot subscribe to themselves",
            ));
        }
        let created_at = Utc::now();

        let result = sqlx::query(
            r"
            INSERT INTO subscriptions (user_id, author_id, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_id)
        .bind(author_id)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "subscribe"))?;

        Ok(Subscription {
            id: result.last_insert_rowid(),
            user_id,
            author_id,
            created_at,
        })
    }

    /// Remove the subscription of `user_id` to `author_id`
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no such subscription exists
    pub async fn unsubscribe(&self, user_id: i64, author_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "DELETE FROM subscriptions WHERE user_id = $1 AND author_id = $2",
        )
        .bind(user_id)
        .bind(author_id)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "unsubscribe"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Subscription of user {user_id} to author {author_id}"
            )));
        }
        Ok(())
    }

    /// Check whether `user_id` is subscribed to `author_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn is_subscribed(&self, user_id: i64, author_id: i64) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM subscriptions WHERE user_id = $1 AND author_id = $2",
        )
        .bind(user_id)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "is subscribed"))?;

        Ok(count > 0)
    }

    /// List the authors `user_id` follows, ordered by username
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_subscriptions(&self, user_id: i64) -> AppResult<Vec<User>> {
        let rows = sqlx::query(
            r"
            SELECT u.id, u.email, u.username, u.first_name, u.last_name, u.avatar, u.created_at
            FROM subscriptions s
            JOIN users u ON u.id = s.author_id
            WHERE s.user_id = $1
            ORDER BY u.username
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "list subscriptions"))?;

        Ok(rows.iter().map(Self::row_to_user).collect())
    }

    /// List the followers of `author_id`, ordered by username
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_subscribers(&self, author_id: i64) -> AppResult<Vec<User>> {
        let rows = sqlx::query(
            r"
            SELECT u.id, u.email, u.username, u.first_name, u.last_name, u.avatar, u.created_at
            FROM subscriptions s
            JOIN users u ON u.id = s.user_id
            WHERE s.author_id = $1
            ORDER BY u.username
            ",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "list subscribers"))?;

        Ok(rows.iter().map(Self::row_to_user).collect())
    }

    /// Count the followers of `author_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn subscriber_count(&self, author_id: i64) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "subscriber count"))
    }
}
