// ABOUTME: Shared fixtures for the database integration tests
// ABOUTME: In-memory database plus helpers to create users, catalog rows, recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

#![allow(dead_code, clippy::unwrap_used)]

use ladle::database::Database;
use ladle::models::{
    CreateIngredientRequest, CreateRecipeRequest, CreateTagRequest, CreateUserRequest, Ingredient,
    Recipe, RecipeIngredientSpec, Tag, User,
};

/// Create a fresh in-memory database with the full schema
pub async fn create_test_db() -> Database {
    Database::new("sqlite::memory:").await.unwrap()
}

pub async fn create_user(db: &Database, email: &str, username: &str) -> User {
    db.create_user(&CreateUserRequest {
        email: email.into(),
        username: username.into(),
        first_name: "Test".into(),
        last_name: "User".into(),
    })
    .await
    .unwrap()
}

pub async fn create_tag(db: &Database, name: &str, slug: &str) -> Tag {
    db.create_tag(&CreateTagRequest {
        name: name.into(),
        slug: slug.into(),
    })
    .await
    .unwrap()
}

pub async fn create_ingredient(db: &Database, name: &str, unit: &str) -> Ingredient {
    db.create_ingredient(&CreateIngredientRequest {
        name: name.into(),
        measurement_unit: unit.into(),
    })
    .await
    .unwrap()
}

/// Create a recipe with a single ingredient line and no tags
pub async fn create_simple_recipe(
    db: &Database,
    author_id: i64,
    name: &str,
    ingredient_id: i64,
    amount: i64,
) -> Recipe {
    db.create_recipe(
        author_id,
        &CreateRecipeRequest {
            name: name.into(),
            text: "Combine and cook.".into(),
            cooking_time: 10,
            image: None,
            tag_ids: vec![],
            ingredients: vec![RecipeIngredientSpec {
                ingredient_id,
                amount,
            }],
        },
    )
    .await
    .unwrap()
}
