// ABOUTME: Recipe database operations with tag and ingredient associations
// ABOUTME: Transactional create/update, joined detail reads, cascade delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

use super::Database;
use crate::constants::limits;
use crate::errors::{classify_sqlx_error, AppError, AppResult};
use crate::models::{
    CreateRecipeRequest, IngredientAmount, ListRecipesFilter, Recipe, RecipeDetail,
    RecipeIngredientSpec, Tag, UpdateRecipeRequest,
};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};

impl Database {
    /// Create the recipes table and its tag/ingredient join tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_recipes(&self) -> AppResult<()> {
        // Minimums are duplicated as CHECK constraints so rows written past
        // the validators are still rejected by the engine
        let recipes_table = format!(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                text TEXT NOT NULL,
                cooking_time INTEGER NOT NULL CHECK (cooking_time >= {}),
                image TEXT,
                created_at DATETIME NOT NULL
            )
            ",
            limits::COOKING_TIME_MIN
        );
        sqlx::query(&recipes_table)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "migrate recipes"))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_tags (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
                UNIQUE(recipe_id, tag_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "migrate recipes"))?;

        let recipe_ingredients_table = format!(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
                amount INTEGER NOT NULL CHECK (amount >= {}),
                UNIQUE(recipe_id, ingredient_id)
            )
            ",
            limits::AMOUNT_MIN
        );
        sqlx::query(&recipe_ingredients_table)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "migrate recipes"))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_author ON recipes(author_id)")
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "migrate recipes"))?;

        Ok(())
    }

    /// Create a recipe bound to one author, with its tag and ingredient
    /// associations, in a single transaction
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field or amount fails its check, a
    /// not-found error if the author or a referenced tag/ingredient does not
    /// exist, and a constraint-violation error on a duplicate tag or
    /// ingredient within the request
    pub async fn create_recipe(
        &self,
        author_id: i64,
        request: &CreateRecipeRequest,
    ) -> AppResult<Recipe> {
        request.validate()?;
        let created_at = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| classify_sqlx_error(e, "create recipe"))?;

        let result = sqlx::query(
            r"
            INSERT INTO recipes (author_id, name, text, cooking_time, image, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(author_id)
        .bind(&request.name)
        .bind(&request.text)
        .bind(request.cooking_time)
        .bind(&request.image)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| classify_sqlx_error(e, "create recipe"))?;

        let recipe_id = result.last_insert_rowid();
        Self::attach_tags(&mut tx, recipe_id, &request.tag_ids).await?;
        Self::attach_ingredients(&mut tx, recipe_id, &request.ingredients).await?;

        tx.commit()
            .await
            .map_err(|e| classify_sqlx_error(e, "create recipe"))?;

        tracing::debug!(recipe_id, author_id, "recipe created");

        Ok(Recipe {
            id: recipe_id,
            author_id,
            name: request.name.clone(),
            text: request.text.clone(),
            cooking_time: request.cooking_time,
            image: request.image.clone(),
            created_at,
        })
    }

    /// Get a recipe with its tags, ingredient amounts, and the viewer's
    /// favorite/cart membership resolved
    ///
    /// Membership flags are derived from the edge tables at read time;
    /// without a viewer both are false.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the recipe does not exist
    pub async fn get_recipe(
        &self,
        recipe_id: i64,
        viewer_id: Option<i64>,
    ) -> AppResult<RecipeDetail> {
        let row = sqlx::query(
            r"
            SELECT id, author_id, name, text, cooking_time, image, created_at
            FROM recipes WHERE id = $1
            ",
        )
        .bind(recipe_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "get recipe"))?;

        let recipe =
            row.map(|r| row_to_recipe(&r))
                .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))?;

        let tags = sqlx::query(
            r"
            SELECT t.id, t.name, t.slug
            FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = $1
            ORDER BY t.name
            ",
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "get recipe tags"))?
        .iter()
        .map(|r| Tag {
            id: r.get("id"),
            name: r.get("name"),
            slug: r.get("slug"),
        })
        .collect();

        let ingredients = sqlx::query(
            r"
            SELECT i.id AS ingredient_id, i.name, i.measurement_unit, ri.amount
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = $1
            ORDER BY i.name
            ",
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "get recipe ingredients"))?
        .iter()
        .map(|r| IngredientAmount {
            ingredient_id: r.get("ingredient_id"),
            name: r.get("name"),
            measurement_unit: r.get("measurement_unit"),
            amount: r.get("amount"),
        })
        .collect();

        let (is_favorited, is_in_shopping_cart) = match viewer_id {
            Some(viewer) => (
                self.is_favorited(viewer, recipe_id).await?,
                self.is_in_cart(viewer, recipe_id).await?,
            ),
            None => (false, false),
        };

        Ok(RecipeDetail {
            recipe,
            tags,
            ingredients,
            is_favorited,
            is_in_shopping_cart,
        })
    }

    /// List recipes newest-first with optional author and tag-slug filters
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_recipes(&self, filter: &ListRecipesFilter) -> AppResult<Vec<Recipe>> {
        let limit = i64::from(filter.limit.unwrap_or(50));
        let offset = i64::from(filter.offset.unwrap_or(0));

        let rows = sqlx::query(
            r"
            SELECT r.id, r.author_id, r.name, r.text, r.cooking_time, r.image, r.created_at
            FROM recipes r
            WHERE ($1 IS NULL OR r.author_id = $1)
              AND ($2 IS NULL OR EXISTS (
                    SELECT 1 FROM recipe_tags rt
                    JOIN tags t ON t.id = rt.tag_id
                    WHERE rt.recipe_id = r.id AND t.slug = $2))
            ORDER BY r.id DESC
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(filter.author_id)
        .bind(&filter.tag_slug)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "list recipes"))?;

        Ok(rows.iter().map(row_to_recipe).collect())
    }

    /// List an author's recipes newest-first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_recipes_by_author(&self, author_id: i64) -> AppResult<Vec<Recipe>> {
        self.list_recipes(&ListRecipesFilter {
            author_id: Some(author_id),
            ..Default::default()
        })
        .await
    }

    /// Update a recipe; provided association sets replace the existing ones
    ///
    /// # Errors
    ///
    /// Returns a validation error if a provided field fails its check, a
    /// not-found error if the recipe or a referenced tag/ingredient does not
    /// exist, and a constraint-violation error on duplicates within a
    /// replacement set
    pub async fn update_recipe(
        &self,
        recipe_id: i64,
        request: &UpdateRecipeRequest,
    ) -> AppResult<Recipe> {
        request.validate()?;

        let detail = self.get_recipe(recipe_id, None).await?;
        let mut recipe = detail.recipe;

        if let Some(name) = &request.name {
            recipe.name.clone_from(name);
        }
        if let Some(text) = &request.text {
            recipe.text.clone_from(text);
        }
        if let Some(cooking_time) = request.cooking_time {
            recipe.cooking_time = cooking_time;
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| classify_sqlx_error(e, "update recipe"))?;

        sqlx::query(
            "UPDATE recipes SET name = $2, text = $3, cooking_time = $4 WHERE id = $1",
        )
        .bind(recipe_id)
        .bind(&recipe.name)
        .bind(&recipe.text)
        .bind(recipe.cooking_time)
        .execute(&mut *tx)
        .await
        .map_err(|e| classify_sqlx_error(e, "update recipe"))?;

        if let Some(tag_ids) = &request.tag_ids {
            sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
                .bind(recipe_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| classify_sqlx_error(e, "update recipe tags"))?;
            Self::attach_tags(&mut tx, recipe_id, tag_ids).await?;
        }

        if let Some(ingredients) = &request.ingredients {
            sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
                .bind(recipe_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| classify_sqlx_error(e, "update recipe ingredients"))?;
            Self::attach_ingredients(&mut tx, recipe_id, ingredients).await?;
        }

        tx.commit()
            .await
            .map_err(|e| classify_sqlx_error(e, "update recipe"))?;

        Ok(recipe)
    }

    /// Set or clear a recipe's image path
    ///
    /// The path is an opaque reference to an uploaded file; image content is
    /// never inspected here.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the recipe does not exist
    pub async fn set_recipe_image(&self, recipe_id: i64, image: Option<&str>) -> AppResult<()> {
        let result = sqlx::query("UPDATE recipes SET image = $2 WHERE id = $1")
            .bind(recipe_id)
            .bind(image)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "set recipe image"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }
        Ok(())
    }

    /// Delete a recipe
    ///
    /// Cascades to its tag, ingredient, favorite, and cart edges.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the recipe does not exist
    pub async fn delete_recipe(&self, recipe_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "delete recipe"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }
        Ok(())
    }

    /// Get total recipe count
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn recipe_count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "recipe count"))
    }

    async fn attach_tags(
        tx: &mut Transaction<'_, Sqlite>,
        recipe_id: i64,
        tag_ids: &[i64],
    ) -> AppResult<()> {
        for tag_id in tag_ids {
            sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES ($1, $2)")
                .bind(recipe_id)
                .bind(tag_id)
                .execute(&mut **tx)
                .await
                .map_err(|e| classify_sqlx_error(e, "attach tag"))?;
        }
        Ok(())
    }

    async fn attach_ingredients(
        tx: &mut Transaction<'_, Sqlite>,
        recipe_id: i64,
        ingredients: &[RecipeIngredientSpec],
    ) -> AppResult<()> {
        for spec in ingredients {
            sqlx::query(
                "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES ($1, $2, $3)",
            )
            .bind(recipe_id)
            .bind(spec.ingredient_id)
            .bind(spec.amount)
            .execute(&mut **tx)
            .await
            .map_err(|e| classify_sqlx_error(e, "attach ingredient"))?;
        }
        Ok(())
    }
}

fn row_to_recipe(row: &SqliteRow) -> Recipe {
    Recipe {
        id: row.get("id"),
        author_id: row.get("author_id"),
        name: row.get("name"),
        text: row.get("text"),
        cooking_time: row.get("cooking_time"),
        image: row.get("image"),
        created_at: row.get("created_at"),
    }
}
