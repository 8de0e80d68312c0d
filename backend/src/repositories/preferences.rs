//! Saved search preferences, one row per user

use anyhow::Result;
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserPreferencesRecord {
    pub user_id: String,
    pub preferred_ingredients: Vec<String>,
    pub cuisine: Option<String>,
    pub dietary_preferences: Vec<String>,
    pub exclude_disliked: Option<bool>,
}

pub struct PreferencesRepository;

impl PreferencesRepository {
    /// Insert or overwrite the user's preferences
    pub async fn upsert(db: &PgPool, record: &UserPreferencesRecord) -> Result<UserPreferencesRecord> {
        let saved = sqlx::query_as::<_, UserPreferencesRecord>(
            r#"
            INSERT INTO user_preferences
                (user_id, preferred_ingredients, cuisine, dietary_preferences, exclude_disliked)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                preferred_ingredients = EXCLUDED.preferred_ingredients,
                cuisine = EXCLUDED.cuisine,
                dietary_preferences = EXCLUDED.dietary_preferences,
                exclude_disliked = EXCLUDED.exclude_disliked
            RETURNING user_id, preferred_ingredients, cuisine, dietary_preferences, exclude_disliked
            "#,
        )
        .bind(&record.user_id)
        .bind(&record.preferred_ingredients)
        .bind(&record.cuisine)
        .bind(&record.dietary_preferences)
        .bind(record.exclude_disliked)
        .fetch_one(db)
        .await?;

        Ok(saved)
    }

    pub async fn find(db: &PgPool, user_id: &str) -> Result<Option<UserPreferencesRecord>> {
        let record = sqlx::query_as::<_, UserPreferencesRecord>(
            r#"
            SELECT user_id, preferred_ingredients, cuisine, dietary_preferences, exclude_disliked
            FROM user_preferences
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(record)
    }
}
