// ABOUTME: Tag and ingredient reference-data models
// ABOUTME: Validated create requests for the catalog store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

use super::{check_max_length, check_not_empty};
use crate::constants::{limits, SLUG_PATTERN};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// A recipe tag
///
/// Name and slug are each globally unique; lists come back ordered by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Surrogate key
    pub id: i64,
    /// Display name, unique
    pub name: String,
    /// URL-safe identifier, unique
    pub slug: String,
}

/// Request to create a tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTagRequest {
    /// Display name
    pub name: String,
    /// URL-safe identifier
    pub slug: String,
}

impl CreateTagRequest {
    /// Validate field bounds and the slug pattern
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field is empty, too long, or the slug
    /// contains characters outside letters, digits, hyphen and underscore
    pub fn validate(&self) -> AppResult<()> {
        check_not_empty("name", &self.name)?;
        check_max_length("name", &self.name, limits::TAG_MAX_LENGTH)?;
        check_not_empty("slug", &self.slug)?;
        check_max_length("slug", &self.slug, limits::TAG_MAX_LENGTH)?;
        if !SLUG_PATTERN.is_match(&self.slug) {
            return Err(AppError::invalid_input(
                "slug may contain only letters, digits, hyphens and underscores",
            ));
        }
        Ok(())
    }
}

/// An ingredient with its measurement unit
///
/// The (name, unit) pair is unique; the same name may recur with a different
/// unit. Lists come back ordered by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Surrogate key
    pub id: i64,
    /// Ingredient name
    pub name: String,
    /// Unit the amount is measured in (g, ml, pcs, ...)
    pub measurement_unit: String,
}

/// Request to create an ingredient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIngredientRequest {
    /// Ingredient name
    pub name: String,
    /// Unit the amount is measured in
    pub measurement_unit: String,
}

impl CreateIngredientRequest {
    /// Validate field bounds
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field is empty or too long
    pub fn validate(&self) -> AppResult<()> {
        check_not_empty("name", &self.name)?;
        check_max_length("name", &self.name, limits::INGREDIENT_MAX_LENGTH)?;
        check_not_empty("measurement_unit", &self.measurement_unit)?;
        check_max_length(
            "measurement_unit",
            &self.measurement_unit,
            limits::UNIT_MAX_LENGTH,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_slug_pattern() {
        let good = CreateTagRequest {
            name: "Dinner".into(),
            slug: "weeknight_dinner-2".into(),
        };
        assert!(good.validate().is_ok());

        let bad = CreateTagRequest {
            name: "Dinner".into(),
            slug: "weeknight dinner".into(),
        };
        assert!(bad.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_ingredient_bounds() {
        let good = CreateIngredientRequest {
            name: "Salt".into(),
            measurement_unit: "g".into(),
        };
        assert!(good.validate().is_ok());

        let bad = CreateIngredientRequest {
            name: "x".repeat(200),
            measurement_unit: "g".into(),
        };
        assert!(bad.validate().unwrap_err().is_validation());
    }
}
