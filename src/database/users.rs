// ABOUTME: User account database operations
// ABOUTME: Handles registration, lookup by email, profile and avatar updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

use super::Database;
use crate::errors::{classify_sqlx_error, AppError, AppResult};
use crate::models::{CreateUserRequest, UpdateProfileRequest, User};
use chrono::Utc;
use sqlx::Row;

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT UNIQUE NOT NULL,
                username TEXT UNIQUE NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                avatar TEXT,
                created_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "migrate users"))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "migrate users"))?;

        Ok(())
    }

    /// Create a new user
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field fails its bound or pattern
    /// check, and a constraint-violation error if the email or username is
    /// already taken
    pub async fn create_user(&self, request: &CreateUserRequest) -> AppResult<User> {
        request.validate()?;
        let created_at = Utc::now();

        let result = sqlx::query(
            r"
            INSERT INTO users (email, username, first_name, last_name, avatar, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&request.email)
        .bind(&request.username)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(Option::<String>::None)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "create user"))?;

        Ok(User {
            id: result.last_insert_rowid(),
            email: request.email.clone(),
            username: request.username.clone(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            avatar: None,
            created_at,
        })
    }

    /// Get a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user(&self, user_id: i64) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, email, username, first_name, last_name, avatar, created_at
            FROM users WHERE id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "get user"))?;

        Ok(row.map(|r| Self::row_to_user(&r)))
    }

    /// Get a user by email (the login identifier)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, email, username, first_name, last_name, avatar, created_at
            FROM users WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "get user by email"))?;

        Ok(row.map(|r| Self::row_to_user(&r)))
    }

    /// Get a user by email, returning an error if not found
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no user has this email
    pub async fn get_user_by_email_required(&self, email: &str) -> AppResult<User> {
        self.get_user_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with email {email}")))
    }

    /// List all users ordered by username
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query(
            r"
            SELECT id, email, username, first_name, last_name, avatar, created_at
            FROM users ORDER BY username
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "list users"))?;

        Ok(rows.iter().map(Self::row_to_user).collect())
    }

    /// Update a user's profile names
    ///
    /// # Errors
    ///
    /// Returns a validation error if a provided name fails its bound check,
    /// and a not-found error if the user does not exist
    pub async fn update_profile(
        &self,
        user_id: i64,
        request: &UpdateProfileRequest,
    ) -> AppResult<User> {
        request.validate()?;

        let mut user = self
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id}")))?;

        if let Some(first_name) = &request.first_name {
            user.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &request.last_name {
            user.last_name.clone_from(last_name);
        }

        sqlx::query("UPDATE users SET first_name = $2, last_name = $3 WHERE id = $1")
            .bind(user_id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "update profile"))?;

        Ok(user)
    }

    /// Set or clear a user's avatar path
    ///
    /// The path is an opaque reference to an uploaded file; image content is
    /// never inspected here.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the user does not exist
    pub async fn update_avatar(&self, user_id: i64, avatar: Option<&str>) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET avatar = $2 WHERE id = $1")
            .bind(user_id)
            .bind(avatar)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "update avatar"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id}")));
        }
        Ok(())
    }

    /// Delete a user
    ///
    /// Cascades to subscriptions on either side, authored recipes, and every
    /// edge hanging off those recipes.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the user does not exist
    pub async fn delete_user(&self, user_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "delete user"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id}")));
        }
        Ok(())
    }

    /// Get total user count
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn user_count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "user count"))
    }

    /// Convert a database row to a `User` struct
    pub(super) fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> User {
        User {
            id: row.get("id"),
            email: row.get("email"),
            username: row.get("username"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            avatar: row.get("avatar"),
            created_at: row.get("created_at"),
        }
    }
}
