// ABOUTME: User account and subscription models
// ABOUTME: Validated create/update requests for the identity store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

use super::{check_max_length, check_not_empty};
use crate::constants::{limits, USERNAME_PATTERN};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user account
///
/// Email is the login identifier; email and username are each globally
/// unique. The avatar holds an opaque stored path, never image content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Surrogate key
    pub id: i64,
    /// Login identifier, globally unique
    pub email: String,
    /// Display handle, globally unique
    pub username: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Stored avatar path, if one was uploaded
    pub avatar: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Request to create a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Login identifier
    pub email: String,
    /// Display handle
    pub username: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

impl CreateUserRequest {
    /// Validate field bounds and patterns
    ///
    /// # Errors
    ///
    /// Returns a validation error if any field is empty, exceeds its column
    /// width, the email has no `@`, or the username contains characters
    /// outside the allowed set
    pub fn validate(&self) -> AppResult<()> {
        check_not_empty("email", &self.email)?;
        check_max_length("email", &self.email, limits::EMAIL_MAX_LENGTH)?;
        if !self.email.contains('@') {
            return Err(AppError::invalid_input("email must contain '@'"));
        }

        check_not_empty("username", &self.username)?;
        check_max_length("username", &self.username, limits::NAME_MAX_LENGTH)?;
        if !USERNAME_PATTERN.is_match(&self.username) {
            return Err(AppError::invalid_input(
                "username may contain only letters, digits and . @ + - _",
            ));
        }

        check_not_empty("first_name", &self.first_name)?;
        check_max_length("first_name", &self.first_name, limits::NAME_MAX_LENGTH)?;
        check_not_empty("last_name", &self.last_name)?;
        check_max_length("last_name", &self.last_name, limits::NAME_MAX_LENGTH)?;

        Ok(())
    }
}

/// Request to update a user's profile names
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New given name, if changing
    pub first_name: Option<String>,
    /// New family name, if changing
    pub last_name: Option<String>,
}

impl UpdateProfileRequest {
    /// Validate field bounds
    ///
    /// # Errors
    ///
    /// Returns a validation error if a provided name is empty or too long
    pub fn validate(&self) -> AppResult<()> {
        if let Some(first_name) = &self.first_name {
            check_not_empty("first_name", first_name)?;
            check_max_length("first_name", first_name, limits::NAME_MAX_LENGTH)?;
        }
        if let Some(last_name) = &self.last_name {
            check_not_empty("last_name", last_name)?;
            check_max_length("last_name", last_name, limits::NAME_MAX_LENGTH)?;
        }
        Ok(())
    }
}

/// A subscription edge: `user_id` follows `author_id`
///
/// Unique per (user, author) pair; self-subscription is rejected by a check
/// constraint. Deleting either endpoint cascades deletion of the edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Surrogate key
    pub id: i64,
    /// The follower
    pub user_id: i64,
    /// The followed author
    pub author_id: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
