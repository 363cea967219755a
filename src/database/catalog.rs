// ABOUTME: Catalog database operations for tags and ingredients
// ABOUTME: Reference data with name/slug uniqueness and name-ordered reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

use super::Database;
use crate::errors::{classify_sqlx_error, AppError, AppResult};
use crate::models::{CreateIngredientRequest, CreateTagRequest, Ingredient, Tag};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

impl Database {
    /// Create the tags and ingredients tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_catalog(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS tags (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL,
                slug TEXT UNIQUE NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "migrate catalog"))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                measurement_unit TEXT NOT NULL,
                UNIQUE(name, measurement_unit)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "migrate catalog"))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_ingredients_name ON ingredients(name)")
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "migrate catalog"))?;

        Ok(())
    }

    // ── Tags ────────────────────────────────────────────────────────────

    /// Create a new tag
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field fails its bound or pattern
    /// check, and a constraint-violation error on a duplicate name or slug
    pub async fn create_tag(&self, request: &CreateTagRequest) -> AppResult<Tag> {
        request.validate()?;

        let result = sqlx::query("INSERT INTO tags (name, slug) VALUES ($1, $2)")
            .bind(&request.name)
            .bind(&request.slug)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "create tag"))?;

        Ok(Tag {
            id: result.last_insert_rowid(),
            name: request.name.clone(),
            slug: request.slug.clone(),
        })
    }

    /// Get a tag by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_tag(&self, tag_id: i64) -> AppResult<Option<Tag>> {
        let row = sqlx::query("SELECT id, name, slug FROM tags WHERE id = $1")
            .bind(tag_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "get tag"))?;

        Ok(row.map(|r| row_to_tag(&r)))
    }

    /// Get a tag by slug
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_tag_by_slug(&self, slug: &str) -> AppResult<Option<Tag>> {
        let row = sqlx::query("SELECT id, name, slug FROM tags WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "get tag by slug"))?;

        Ok(row.map(|r| row_to_tag(&r)))
    }

    /// List all tags ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_tags(&self) -> AppResult<Vec<Tag>> {
        let rows = sqlx::query("SELECT id, name, slug FROM tags ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "list tags"))?;

        Ok(rows.iter().map(row_to_tag).collect())
    }

    /// Delete a tag
    ///
    /// Cascades to its recipe associations.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the tag does not exist
    pub async fn delete_tag(&self, tag_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(tag_id)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "delete tag"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Tag {tag_id}")));
        }
        Ok(())
    }

    // ── Ingredients ─────────────────────────────────────────────────────

    /// Create a new ingredient
    ///
    /// The same name may recur with a different measurement unit.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field fails its bound check, and a
    /// constraint-violation error on a duplicate (name, unit) pair
    pub async fn create_ingredient(
        &self,
        request: &CreateIngredientRequest,
    ) -> AppResult<Ingredient> {
        request.validate()?;

        let result =
            sqlx::query("INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2)")
                .bind(&request.name)
                .bind(&request.measurement_unit)
                .execute(&self.pool)
                .await
                .map_err(|e| classify_sqlx_error(e, "create ingredient"))?;

        Ok(Ingredient {
            id: result.last_insert_rowid(),
            name: request.name.clone(),
            measurement_unit: request.measurement_unit.clone(),
        })
    }

    /// Get an ingredient by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_ingredient(&self, ingredient_id: i64) -> AppResult<Option<Ingredient>> {
        let row =
            sqlx::query("SELECT id, name, measurement_unit FROM ingredients WHERE id = $1")
                .bind(ingredient_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| classify_sqlx_error(e, "get ingredient"))?;

        Ok(row.map(|r| row_to_ingredient(&r)))
    }

    /// List all ingredients ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_ingredients(&self) -> AppResult<Vec<Ingredient>> {
        let rows =
            sqlx::query("SELECT id, name, measurement_unit FROM ingredients ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| classify_sqlx_error(e, "list ingredients"))?;

        Ok(rows.iter().map(row_to_ingredient).collect())
    }

    /// Search ingredients by name prefix, ordered by name
    ///
    /// Backs the ingredient autocomplete in the API layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn search_ingredients(&self, name_prefix: &str) -> AppResult<Vec<Ingredient>> {
        // LIKE wildcards in the prefix would widen the match, not break it
        let pattern = format!("{name_prefix}%");
        let rows = sqlx::query(
            "SELECT id, name, measurement_unit FROM ingredients WHERE name LIKE $1 ORDER BY name",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error(e, "search ingredients"))?;

        Ok(rows.iter().map(row_to_ingredient).collect())
    }

    /// Delete an ingredient
    ///
    /// Cascades to its recipe associations.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the ingredient does not exist
    pub async fn delete_ingredient(&self, ingredient_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(ingredient_id)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error(e, "delete ingredient"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Ingredient {ingredient_id}")));
        }
        Ok(())
    }
}

fn row_to_tag(row: &SqliteRow) -> Tag {
    Tag {
        id: row.get("id"),
        name: row.get("name"),
        slug: row.get("slug"),
    }
}

fn row_to_ingredient(row: &SqliteRow) -> Ingredient {
    Ingredient {
        id: row.get("id"),
        name: row.get("name"),
        measurement_unit: row.get("measurement_unit"),
    }
}
