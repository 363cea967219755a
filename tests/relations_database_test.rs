// ABOUTME: Integration tests for favorites and shopping cart edges
// ABOUTME: Duplicate guards, not-found removals, cart ingredient totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use common::{create_ingredient, create_test_db, create_user};
use ladle::models::{CreateRecipeRequest, RecipeIngredientSpec};

#[tokio::test]
async fn test_favorite_roundtrip() {
    let db = create_test_db().await;
    let alice = create_user(&db, "a@x.com", "alice").await;
    let salt = create_ingredient(&db, "Salt", "g").await;
    let soup = common::create_simple_recipe(&db, alice.id, "Soup", salt.id, 5).await;

    db.add_favorite(alice.id, soup.id).await.unwrap();
    assert!(db.is_favorited(alice.id, soup.id).await.unwrap());

    let favorites = db.list_favorites(alice.id).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].name, "Soup");

    db.remove_favorite(alice.id, soup.id).await.unwrap();
    assert!(!db.is_favorited(alice.id, soup.id).await.unwrap());
}

#[tokio::test]
async fn test_duplicate_favorite_rejected() {
    let db = create_test_db().await;
    let alice = create_user(&db, "a@x.com", "alice").await;
    let salt = create_ingredient(&db, "Salt", "g").await;
    let soup = common::create_simple_recipe(&db, alice.id, "Soup", salt.id, 5).await;

    db.add_favorite(alice.id, soup.id).await.unwrap();
    let err = db.add_favorite(alice.id, soup.id).await.unwrap_err();
    assert!(err.is_constraint_violation());
}

#[tokio::test]
async fn test_remove_missing_edges_not_found() {
    let db = create_test_db().await;
    let alice = create_user(&db, "a@x.com", "alice").await;
    let salt = create_ingredient(&db, "Salt", "g").await;
    let soup = common::create_simple_recipe(&db, alice.id, "Soup", salt.id, 5).await;

    assert!(db
        .remove_favorite(alice.id, soup.id)
        .await
        .unwrap_err()
        .is_not_found());
    assert!(db
        .remove_from_cart(alice.id, soup.id)
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_edge_to_missing_recipe_not_found() {
    let db = create_test_db().await;
    let alice = create_user(&db, "a@x.com", "alice").await;

    assert!(db.add_favorite(alice.id, 999).await.unwrap_err().is_not_found());
    assert!(db.add_to_cart(alice.id, 999).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_cart_roundtrip() {
    let db = create_test_db().await;
    let alice = create_user(&db, "a@x.com", "alice").await;
    let salt = create_ingredient(&db, "Salt", "g").await;
    let soup = common::create_simple_recipe(&db, alice.id, "Soup", salt.id, 5).await;
    let stew = common::create_simple_recipe(&db, alice.id, "Stew", salt.id, 3).await;

    db.add_to_cart(alice.id, soup.id).await.unwrap();
    db.add_to_cart(alice.id, stew.id).await.unwrap();
    assert!(db.is_in_cart(alice.id, soup.id).await.unwrap());

    // Newest-first
    let cart = db.list_cart(alice.id).await.unwrap();
    let ids: Vec<i64> = cart.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![stew.id, soup.id]);

    let err = db.add_to_cart(alice.id, soup.id).await.unwrap_err();
    assert!(err.is_constraint_violation());
}

#[tokio::test]
async fn test_cart_ingredient_totals_sum_across_recipes() {
    let db = create_test_db().await;
    let alice = create_user(&db, "a@x.com", "alice").await;
    let salt = create_ingredient(&db, "Salt", "g").await;
    let flour = create_ingredient(&db, "Flour", "g").await;
    let milk = create_ingredient(&db, "Milk", "ml").await;

    let pancakes = db
        .create_recipe(
            alice.id,
            &CreateRecipeRequest {
                name: "Pancakes".into(),
                text: "Mix and fry.".into(),
                cooking_time: 20,
                image: None,
                tag_ids: vec![],
                ingredients: vec![
                    RecipeIngredientSpec {
                        ingredient_id: flour.id,
                        amount: 200,
                    },
                    RecipeIngredientSpec {
                        ingredient_id: milk.id,
                        amount: 300,
                    },
                    RecipeIngredientSpec {
                        ingredient_id: salt.id,
                        amount: 5,
                    },
                ],
            },
        )
        .await
        .unwrap();
    let bread = db
        .create_recipe(
            alice.id,
            &CreateRecipeRequest {
                name: "Bread".into(),
                text: "Knead and bake.".into(),
                cooking_time: 90,
                image: None,
                tag_ids: vec![],
                ingredients: vec![
                    RecipeIngredientSpec {
                        ingredient_id: flour.id,
                        amount: 500,
                    },
                    RecipeIngredientSpec {
                        ingredient_id: salt.id,
                        amount: 10,
                    },
                ],
            },
        )
        .await
        .unwrap();

    db.add_to_cart(alice.id, pancakes.id).await.unwrap();
    db.add_to_cart(alice.id, bread.id).await.unwrap();

    let totals = db.cart_ingredient_totals(alice.id).await.unwrap();
    let as_tuples: Vec<(&str, &str, i64)> = totals
        .iter()
        .map(|t| (t.name.as_str(), t.measurement_unit.as_str(), t.total_amount))
        .collect();
    assert_eq!(
        as_tuples,
        vec![("Flour", "g", 700), ("Milk", "ml", 300), ("Salt", "g", 15)]
    );

    // An empty cart aggregates to nothing
    let bob = create_user(&db, "b@x.com", "bob").await;
    assert!(db.cart_ingredient_totals(bob.id).await.unwrap().is_empty());
}
