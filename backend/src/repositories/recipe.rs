//! Recipe repository for database operations
//!
//! Recipes and their ingredient lines are always written together inside
//! one transaction.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;

const RECIPE_COLUMNS: &str = "r.id, r.user_id, r.title, r.image_source, r.steps, r.is_public, \
     r.dietary_preferences, r.cooking_time, r.cuisine, r.created_at";

/// Recipe record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeRecord {
    pub id: i64,
    pub user_id: String,
    pub title: String,
    pub image_source: Option<String>,
    pub steps: Vec<String>,
    pub is_public: bool,
    /// Canonical names, e.g. `GLUTEN_FREE`
    pub dietary_preferences: Vec<String>,
    pub cooking_time: Option<String>,
    /// Canonical name, e.g. `NORTH_AMERICAN`
    pub cuisine: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Recipe joined with its owner's email
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeWithOwnerRecord {
    #[sqlx(flatten)]
    pub recipe: RecipeRecord,
    pub user_email: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeIngredientRecord {
    pub id: i64,
    pub recipe_id: i64,
    pub position: i32,
    pub name: String,
    pub quantity: Option<String>,
}

/// Column values written on create and update
#[derive(Debug, Clone)]
pub struct RecipeFields {
    pub title: String,
    pub steps: Vec<String>,
    pub is_public: bool,
    pub dietary_preferences: Vec<String>,
    pub cooking_time: Option<String>,
    pub cuisine: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub name: String,
    pub quantity: Option<String>,
}

/// Recipe repository
pub struct RecipeRepository;

impl RecipeRepository {
    /// Insert a recipe and its ingredients
    pub async fn create(
        db: &PgPool,
        user_id: &str,
        fields: &RecipeFields,
        ingredients: &[NewIngredient],
    ) -> Result<(RecipeRecord, Vec<RecipeIngredientRecord>)> {
        let mut tx = db.begin().await?;

        let recipe = sqlx::query_as::<_, RecipeRecord>(&format!(
            r#"
            INSERT INTO recipes AS r (user_id, title, steps, is_public, dietary_preferences,
                                      cooking_time, cuisine)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            RECIPE_COLUMNS
        ))
        .bind(user_id)
        .bind(&fields.title)
        .bind(&fields.steps)
        .bind(fields.is_public)
        .bind(&fields.dietary_preferences)
        .bind(&fields.cooking_time)
        .bind(&fields.cuisine)
        .fetch_one(&mut *tx)
        .await?;

        let lines = Self::insert_ingredients(&mut tx, recipe.id, ingredients).await?;
        tx.commit().await?;

        Ok((recipe, lines))
    }

    async fn insert_ingredients(
        tx: &mut Transaction<'_, Postgres>,
        recipe_id: i64,
        ingredients: &[NewIngredient],
    ) -> Result<Vec<RecipeIngredientRecord>> {
        let mut lines = Vec::with_capacity(ingredients.len());
        for (position, ingredient) in ingredients.iter().enumerate() {
            let line = sqlx::query_as::<_, RecipeIngredientRecord>(
                r#"
                INSERT INTO recipe_ingredients (recipe_id, position, name, quantity)
                VALUES ($1, $2, $3, $4)
                RETURNING id, recipe_id, position, name, quantity
                "#,
            )
            .bind(recipe_id)
            .bind(position as i32)
            .bind(&ingredient.name)
            .bind(&ingredient.quantity)
            .fetch_one(&mut **tx)
            .await?;
            lines.push(line);
        }
        Ok(lines)
    }

    /// Overwrite a recipe's columns. Ingredients are replaced only when given.
    pub async fn update(
        db: &PgPool,
        id: i64,
        fields: &RecipeFields,
        ingredients: Option<&[NewIngredient]>,
    ) -> Result<Option<RecipeRecord>> {
        let mut tx = db.begin().await?;

        let recipe = sqlx::query_as::<_, RecipeRecord>(&format!(
            r#"
            UPDATE recipes AS r SET
                title = $2,
                steps = $3,
                is_public = $4,
                dietary_preferences = $5,
                cooking_time = $6,
                cuisine = $7
            WHERE r.id = $1
            RETURNING {}
            "#,
            RECIPE_COLUMNS
        ))
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.steps)
        .bind(fields.is_public)
        .bind(&fields.dietary_preferences)
        .bind(&fields.cooking_time)
        .bind(&fields.cuisine)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(recipe) = recipe else {
            return Ok(None);
        };

        if let Some(ingredients) = ingredients {
            sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::insert_ingredients(&mut tx, id, ingredients).await?;
        }

        tx.commit().await?;
        Ok(Some(recipe))
    }

    /// Find recipe by ID
    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<RecipeRecord>> {
        let recipe = sqlx::query_as::<_, RecipeRecord>(&format!(
            "SELECT {} FROM recipes r WHERE r.id = $1",
            RECIPE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(recipe)
    }

    /// Owner uid of a recipe, if it exists
    pub async fn find_owner(db: &PgPool, id: i64) -> Result<Option<String>> {
        let owner = sqlx::query_scalar::<_, String>("SELECT user_id FROM recipes WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?;

        Ok(owner)
    }

    pub async fn find_by_user(db: &PgPool, user_id: &str) -> Result<Vec<RecipeRecord>> {
        let recipes = sqlx::query_as::<_, RecipeRecord>(&format!(
            "SELECT {} FROM recipes r WHERE r.user_id = $1 ORDER BY r.created_at DESC, r.id DESC",
            RECIPE_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(recipes)
    }

    pub async fn find_public(db: &PgPool) -> Result<Vec<RecipeRecord>> {
        let recipes = sqlx::query_as::<_, RecipeRecord>(&format!(
            "SELECT {} FROM recipes r WHERE r.is_public ORDER BY r.created_at DESC, r.id DESC",
            RECIPE_COLUMNS
        ))
        .fetch_all(db)
        .await?;

        Ok(recipes)
    }

    /// Every recipe with its owner's email (admin listing)
    pub async fn find_all_with_owner(db: &PgPool) -> Result<Vec<RecipeWithOwnerRecord>> {
        let recipes = sqlx::query_as::<_, RecipeWithOwnerRecord>(&format!(
            r#"
            SELECT {}, u.email AS user_email
            FROM recipes r
            LEFT JOIN users u ON u.uid = r.user_id
            ORDER BY r.created_at DESC, r.id DESC
            "#,
            RECIPE_COLUMNS
        ))
        .fetch_all(db)
        .await?;

        Ok(recipes)
    }

    /// Ingredient lines for many recipes, grouped by recipe id in position order
    pub async fn ingredients_for(
        db: &PgPool,
        recipe_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<RecipeIngredientRecord>>> {
        if recipe_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let lines = sqlx::query_as::<_, RecipeIngredientRecord>(
            r#"
            SELECT id, recipe_id, position, name, quantity
            FROM recipe_ingredients
            WHERE recipe_id = ANY($1)
            ORDER BY recipe_id, position
            "#,
        )
        .bind(recipe_ids)
        .fetch_all(db)
        .await?;

        let mut grouped: HashMap<i64, Vec<RecipeIngredientRecord>> = HashMap::new();
        for line in lines {
            grouped.entry(line.recipe_id).or_default().push(line);
        }
        Ok(grouped)
    }

    /// Delete a recipe, returns false if it did not exist
    pub async fn delete(db: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
