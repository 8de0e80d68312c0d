//! Pantry ingredients saved by users

use anyhow::Result;
use recipedash_shared::UserIngredientResponse;
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserIngredientRecord {
    pub id: i64,
    pub user_id: String,
    pub ingredient: String,
}

impl From<UserIngredientRecord> for UserIngredientResponse {
    fn from(record: UserIngredientRecord) -> Self {
        Self {
            id: record.id,
            ingredient: record.ingredient,
        }
    }
}

pub struct UserIngredientRepository;

impl UserIngredientRepository {
    pub async fn create(db: &PgPool, user_id: &str, ingredient: &str) -> Result<UserIngredientRecord> {
        let record = sqlx::query_as::<_, UserIngredientRecord>(
            r#"
            INSERT INTO user_ingredients (user_id, ingredient)
            VALUES ($1, $2)
            RETURNING id, user_id, ingredient
            "#,
        )
        .bind(user_id)
        .bind(ingredient)
        .fetch_one(db)
        .await?;

        Ok(record)
    }

    pub async fn find_by_user(db: &PgPool, user_id: &str) -> Result<Vec<UserIngredientRecord>> {
        let records = sqlx::query_as::<_, UserIngredientRecord>(
            r#"
            SELECT id, user_id, ingredient
            FROM user_ingredients
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(records)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<UserIngredientRecord>> {
        let record = sqlx::query_as::<_, UserIngredientRecord>(
            "SELECT id, user_id, ingredient FROM user_ingredients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(record)
    }

    pub async fn delete(db: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user_ingredients WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
