// ABOUTME: Favorite and shopping cart edge operations
// ABOUTME: User x recipe membership plus cart-wide ingredient aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

use super::Database;
use crate::errors::{classify_sqlx_error, AppError, AppResult};
use crate::models::{CartIngredientTotal, Recipe};
use chrono::Utc;
use sqlx::Row;

impl Database {
    /// Create the favorite and shopping cart edge tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_relations(&self) -> AppResult<()> {
        for table in ["favorite_recipes", "shopping_carts"] {
            let create = format!(
                r"
                CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                    recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                    created_at DATETIME NOT NULL,
                    UNIQUE(user_id, recipe_id)
                )
                "
            );
            sqlx::query(&create)
                .execute(&self.pool)
                .await
                .map_err(|e| classify_sqlx_error(e, "migrate relations"))?;

            let index = format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_recipe ON {table}(recipe_id)"
            );
            sqlx::query(&index)
                .execute(&self.pool)
                .await
                .map_err(|e| classify_sqlx_error(e, "migrate relations"))?;
        }

        Ok(())
    }

    // ── Favorites ───────────────────────────────────────────────────────

    /// Add a recipe to a user's favorites
    ///
    /// # Errors
    ///
    /// Returns a constraint-violation error if the pair already exists, and
    /// a not-found error if the user or recipe is missing
    pub async fn add_favorite(&self, user_id: i64, recipe_id: i64) -> AppResult<()> {
        self.insert_edge("favorite_recipes", user_id, recipe_id, "add favorite")
            .await
    }

    /// Remove a recipe from a user's favorites
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the pair does not exist
    pub async fn remove_favorite(&self, user_id: i64, recipe_id: i64) -> AppResult<()> {
        self.delete_edge("favorite_recipes", user_id, recipe_id, "Favorite")
            .await
    }

    /// Check whether a recipe is in a user's favorites
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn is_favorited(&self, user_id: i64, recipe_id: i64) -> AppResult<bool> {
        self.edge_exists("favorite_recipes", user_id, recipe_id, "is favorited")
            .await
    }

    /// List a user's favorite recipes, newest-first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_favorites(&self, user_id: i64) -> AppResult<Vec<Recipe>> {
        self.list_edge_recipes("favorite_recipes", user_id, "list favorites")
            .await
    }

    // ── Shopping cart ───────────────────────────────────────────────────

    /// Add a recipe to a user's shopping cart
    ///
    /// # Errors
    ///
    /// Returns a constraint-violation error if the pair already exists, and
    /// a not-found error if the user or recipe is missing
    pub async fn add_to_cart(&self, user_id: i64, recipe_id: i64) -> AppResult<()> {
        self.insert_edge("shopping_carts", user_id, recipe_id, "add to cart")
            .await
    }

    /// Remove a recipe from a user's shopping cart
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the pair does not exist
    pub async fn remove_from_cart(&self, user_id: i64, recipe_id: i64) -> AppResult<()> {
        self.delete_edge("shopping_carts", user_id, recipe_id, "Cart entry")
            .await
    }

    /// Check whether a recipe is in a user's shopping cart
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn is_in_cart(&self, user_id: i64, recipe_id: i64) -> AppResult<bool> {
        self.edge_exists("shopping_carts", user_id, recipe_id, "is in cart")
            .await
    }

    /// List the recipes in a user's shopping cart, newest-first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_cart(&self, user_id: i64) -> AppResult<Vec<Recipe>> {
        self.list_edge_recipes("shopping_carts", user_id, "list cart")
            .await
    }

    /// Aggregate ingredient amounts across every recipe in a user's cart
    ///
    /// Amounts are summed per ingredient and come back ordered by ingredient
    /// name; this is the data behind the downloadable shopping list.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn cart_ingredient_totals(
        &self,
        user_id: i64,
    ) -> AppResult<Vec<CartIngredientTotal>> {
        let rows = sqlx::query(
            r"
            SELECT i.name, i.measurement_unit, SUM(ri.amount) AS total_amount
            FROM shopping_carts sc
            JOIN recipe_ingredients ri ON ri.recipe_id = sc.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE sc.user_id = $1
            GROUP BY i.id
            ORDER BY i.name
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "cart ingredient totals"))?;

        Ok(rows
            .iter()
            .map(|r| CartIngredientTotal {
                name: r.get("name"),
                measurement_unit: r.get("measurement_unit"),
                total_amount: r.get("total_amount"),
            })
            .collect())
    }

    // ── Shared edge plumbing ────────────────────────────────────────────
    // Table names are compile-time literals, never caller input.

    async fn insert_edge(
        &self,
        table: &str,
        user_id: i64,
        recipe_id: i64,
        context: &str,
    ) -> AppResult<()> {
        let query = format!("INSERT INTO {table} (user_id, recipe_id, created_at) VALUES ($1, $2, $3)");
        sqlx::query(&query)
            .bind(user_id)
            .bind(recipe_id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, context))?;
        Ok(())
    }

    async fn delete_edge(
        &self,
        table: &str,
        user_id: i64,
        recipe_id: i64,
        resource: &str,
    ) -> AppResult<()> {
        let query = format!("DELETE FROM {table} WHERE user_id = $1 AND recipe_id = $2");
        let result = sqlx::query(&query)
            .bind(user_id)
            .bind(recipe_id)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, resource))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "{resource} of user {user_id} for recipe {recipe_id}"
            )));
        }
        Ok(())
    }

    async fn edge_exists(
        &self,
        table: &str,
        user_id: i64,
        recipe_id: i64,
        context: &str,
    ) -> AppResult<bool> {
        let query =
            format!("SELECT COUNT(*) FROM {table} WHERE user_id = $1 AND recipe_id = $2");
        let count: i64 = sqlx::query_scalar(&query)
            .bind(user_id)
            .bind(recipe_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, context))?;
        Ok(count > 0)
    }

    async fn list_edge_recipes(
        &self,
        table: &str,
        user_id: i64,
        context: &str,
    ) -> AppResult<Vec<Recipe>> {
        let query = format!(
            r"
            SELECT r.id, r.author_id, r.name, r.text, r.cooking_time, r.image, r.created_at
            FROM {table} e
            JOIN recipes r ON r.id = e.recipe_id
            WHERE e.user_id = $1
            ORDER BY r.id DESC
            "
        );
        let rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, context))?;

        Ok(rows
            .iter()
            .map(|r| Recipe {
                id: r.get("id"),
                author_id: r.get("author_id"),
                name: r.get("name"),
                text: r.get("text"),
                cooking_time: r.get("cooking_time"),
                image: r.get("image"),
                created_at: r.get("created_at"),
            })
            .collect())
    }
}
