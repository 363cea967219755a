// ABOUTME: Data models for the Ladle recipe platform
// ABOUTME: Entities, write-request types, and read-side projections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

//! # Data Models
//!
//! Entity structs mirror the schema one-to-one; every entity carries an
//! opaque `i64` surrogate key assigned by the storage engine. Write requests
//! (`Create*Request` / `Update*Request`) validate field bounds before any
//! SQL runs, so the stores only ever hand well-formed rows to the engine.

mod catalog;
mod recipe;
mod short_link;
mod user;

pub use catalog::{CreateIngredientRequest, CreateTagRequest, Ingredient, Tag};
pub use recipe::{
    CartIngredientTotal, CreateRecipeRequest, IngredientAmount, ListRecipesFilter, Recipe,
    RecipeDetail, RecipeIngredientSpec, UpdateRecipeRequest,
};
pub use short_link::ShortLink;
pub use user::{CreateUserRequest, Subscription, UpdateProfileRequest, User};

use crate::errors::{AppError, AppResult};

/// Reject a field value longer than its column width
pub(crate) fn check_max_length(field: &str, value: &str, max: usize) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::out_of_range(format!(
            "{field} exceeds maximum length of {max} characters"
        )));
    }
    Ok(())
}

/// Reject an empty field value
pub(crate) fn check_not_empty(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_input(format!("{field} must not be empty")));
    }
    Ok(())
}
