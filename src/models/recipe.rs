// ABOUTME: Recipe models: entity, joined detail projection, write requests
// ABOUTME: Carries per-recipe ingredient amounts and tag associations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

use super::{check_max_length, check_not_empty, Tag};
use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recipe as stored
///
/// Bound to exactly one author; deleting the author cascades here, and
/// deleting a recipe cascades to its tag, ingredient, favorite and cart
/// edges. Lists come back newest-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Surrogate key
    pub id: i64,
    /// Authoring user
    pub author_id: i64,
    /// Recipe name
    pub name: String,
    /// Free-text description and instructions
    pub text: String,
    /// Cooking time in minutes
    pub cooking_time: i64,
    /// Stored image path, if one was uploaded
    pub image: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// One ingredient line of a recipe, resolved through the join table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientAmount {
    /// The referenced ingredient
    pub ingredient_id: i64,
    /// Ingredient name
    pub name: String,
    /// Unit the amount is measured in
    pub measurement_unit: String,
    /// Quantity of the ingredient in this recipe
    pub amount: i64,
}

/// A recipe with its associations resolved, read for an optional viewer
///
/// Favorite and cart membership are derived per (viewer, recipe) from the
/// edge tables at read time; without a viewer both flags are false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDetail {
    /// The recipe row itself
    pub recipe: Recipe,
    /// Attached tags, ordered by name
    pub tags: Vec<Tag>,
    /// Ingredient lines, ordered by ingredient name
    pub ingredients: Vec<IngredientAmount>,
    /// Whether the viewer has favorited this recipe
    pub is_favorited: bool,
    /// Whether the recipe is in the viewer's shopping cart
    pub is_in_shopping_cart: bool,
}

/// One ingredient line of a create/update request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredientSpec {
    /// The referenced ingredient
    pub ingredient_id: i64,
    /// Quantity of the ingredient
    pub amount: i64,
}

/// Request to create a recipe with its tag and ingredient associations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecipeRequest {
    /// Recipe name
    pub name: String,
    /// Free-text description and instructions
    pub text: String,
    /// Cooking time in minutes
    pub cooking_time: i64,
    /// Stored image path, if any
    pub image: Option<String>,
    /// Tags to attach
    pub tag_ids: Vec<i64>,
    /// Ingredient lines, at least one
    pub ingredients: Vec<RecipeIngredientSpec>,
}

impl CreateRecipeRequest {
    /// Validate field bounds, cooking time, and ingredient amounts
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty or too long, the
    /// text is empty, the cooking time or any amount is below its minimum,
    /// or the ingredient list is empty
    pub fn validate(&self) -> AppResult<()> {
        check_not_empty("name", &self.name)?;
        check_max_length("name", &self.name, limits::RECIPE_NAME_MAX_LENGTH)?;
        check_not_empty("text", &self.text)?;
        validate_cooking_time(self.cooking_time)?;
        if self.ingredients.is_empty() {
            return Err(AppError::invalid_input(
                "a recipe needs at least one ingredient",
            ));
        }
        for spec in &self.ingredients {
            validate_amount(spec.amount)?;
        }
        Ok(())
    }
}

/// Request to update a recipe; omitted fields keep their current value
///
/// When `tag_ids` or `ingredients` is provided the whole association set is
/// replaced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecipeRequest {
    /// New name, if changing
    pub name: Option<String>,
    /// New description, if changing
    pub text: Option<String>,
    /// New cooking time, if changing
    pub cooking_time: Option<i64>,
    /// Replacement tag set, if changing
    pub tag_ids: Option<Vec<i64>>,
    /// Replacement ingredient lines, if changing (must stay non-empty)
    pub ingredients: Option<Vec<RecipeIngredientSpec>>,
}

impl UpdateRecipeRequest {
    /// Validate the provided fields
    ///
    /// # Errors
    ///
    /// Returns a validation error under the same rules as
    /// [`CreateRecipeRequest::validate`], applied to present fields only
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            check_not_empty("name", name)?;
            check_max_length("name", name, limits::RECIPE_NAME_MAX_LENGTH)?;
        }
        if let Some(text) = &self.text {
            check_not_empty("text", text)?;
        }
        if let Some(cooking_time) = self.cooking_time {
            validate_cooking_time(cooking_time)?;
        }
        if let Some(ingredients) = &self.ingredients {
            if ingredients.is_empty() {
                return Err(AppError::invalid_input(
                    "a recipe needs at least one ingredient",
                ));
            }
            for spec in ingredients {
                validate_amount(spec.amount)?;
            }
        }
        Ok(())
    }
}

/// Filters for listing recipes
#[derive(Debug, Clone, Default)]
pub struct ListRecipesFilter {
    /// Restrict to one author
    pub author_id: Option<i64>,
    /// Restrict to recipes carrying this tag slug
    pub tag_slug: Option<String>,
    /// Maximum number of recipes to return (default 50)
    pub limit: Option<u32>,
    /// Number of recipes to skip
    pub offset: Option<u32>,
}

/// Aggregated amount of one ingredient across a user's shopping cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartIngredientTotal {
    /// Ingredient name
    pub name: String,
    /// Unit the total is measured in
    pub measurement_unit: String,
    /// Sum of amounts over all recipes in the cart
    pub total_amount: i64,
}

fn validate_cooking_time(cooking_time: i64) -> AppResult<()> {
    if cooking_time < limits::COOKING_TIME_MIN {
        return Err(AppError::out_of_range(format!(
            "cooking time must be at least {} minute(s)",
            limits::COOKING_TIME_MIN
        )));
    }
    Ok(())
}

fn validate_amount(amount: i64) -> AppResult<()> {
    if amount < limits::AMOUNT_MIN {
        return Err(AppError::out_of_range(format!(
            "ingredient amount must be at least {}",
            limits::AMOUNT_MIN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateRecipeRequest {
        CreateRecipeRequest {
            name: "Soup".into(),
            text: "Boil everything.".into(),
            cooking_time: 10,
            image: None,
            tag_ids: vec![],
            ingredients: vec![RecipeIngredientSpec {
                ingredient_id: 1,
                amount: 5,
            }],
        }
    }

    #[test]
    fn test_valid_recipe_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_cooking_time_below_minimum() {
        let mut request = valid_request();
        request.cooking_time = 0;
        assert!(request.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_zero_amount_rejected() {
        let mut request = valid_request();
        request.ingredients[0].amount = 0;
        assert!(request.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_empty_ingredient_list_rejected() {
        let mut request = valid_request();
        request.ingredients.clear();
        assert!(request.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_update_validates_present_fields_only() {
        let request = UpdateRecipeRequest {
            cooking_time: Some(0),
            ..Default::default()
        };
        assert!(request.validate().unwrap_err().is_validation());
        assert!(UpdateRecipeRequest::default().validate().is_ok());
    }
}
