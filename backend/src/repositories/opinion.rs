//! Opinion repository for database operations

use anyhow::Result;
use recipedash_shared::UserOpinion;
use sqlx::PgPool;

/// Vote totals for one recipe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct OpinionCounts {
    pub likes: i64,
    pub dislikes: i64,
    pub neutral: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct OpinionRecord {
    #[sqlx(try_from = "String")]
    user_opinion: UserOpinion,
}

pub struct OpinionRepository;

impl OpinionRepository {
    /// Insert or replace the user's opinion on a recipe
    pub async fn upsert(
        db: &PgPool,
        user_id: &str,
        recipe_id: &str,
        recipe_source: &str,
        opinion: UserOpinion,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO opinions (user_id, recipe_id, recipe_source, user_opinion)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, recipe_id, recipe_source)
            DO UPDATE SET user_opinion = EXCLUDED.user_opinion
            "#,
        )
        .bind(user_id)
        .bind(recipe_id)
        .bind(recipe_source)
        .bind(opinion.name())
        .execute(db)
        .await?;

        Ok(())
    }

    pub async fn delete(db: &PgPool, user_id: &str, recipe_id: &str, recipe_source: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM opinions
            WHERE user_id = $1 AND recipe_id = $2 AND recipe_source = $3
            "#,
        )
        .bind(user_id)
        .bind(recipe_id)
        .bind(recipe_source)
        .execute(db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find(
        db: &PgPool,
        user_id: &str,
        recipe_id: &str,
        recipe_source: &str,
    ) -> Result<Option<UserOpinion>> {
        let record = sqlx::query_as::<_, OpinionRecord>(
            r#"
            SELECT user_opinion
            FROM opinions
            WHERE user_id = $1 AND recipe_id = $2 AND recipe_source = $3
            "#,
        )
        .bind(user_id)
        .bind(recipe_id)
        .bind(recipe_source)
        .fetch_optional(db)
        .await?;

        Ok(record.map(|r| r.user_opinion))
    }

    /// Per-opinion totals in a single aggregate query
    pub async fn counts(db: &PgPool, recipe_id: &str, recipe_source: &str) -> Result<OpinionCounts> {
        let counts = sqlx::query_as::<_, OpinionCounts>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE user_opinion = 'LIKE') AS likes,
                COUNT(*) FILTER (WHERE user_opinion = 'DISLIKE') AS dislikes,
                COUNT(*) FILTER (WHERE user_opinion = 'NEUTRAL') AS neutral
            FROM opinions
            WHERE recipe_id = $1 AND recipe_source = $2
            "#,
        )
        .bind(recipe_id)
        .bind(recipe_source)
        .fetch_one(db)
        .await?;

        Ok(counts)
    }

    /// `(recipe_id, recipe_source)` pairs the user disliked
    pub async fn disliked_keys(db: &PgPool, user_id: &str) -> Result<Vec<(String, String)>> {
        let keys = sqlx::query_as::<_, (String, String)>(
            r#"
            SELECT recipe_id, recipe_source
            FROM opinions
            WHERE user_id = $1 AND user_opinion = 'DISLIKE'
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(keys)
    }
}
