//! User repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use recipedash_shared::{Role, Status, UserResponse};
use sqlx::{PgPool, Postgres, Transaction};

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub uid: String,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    #[sqlx(try_from = "String")]
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            uid: record.uid,
            email: record.email,
            role: record.role,
            status: record.status,
        }
    }
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Number of registered users, read inside the sign-up transaction.
    /// Locks the table so concurrent sign-ups see each other's inserts.
    pub async fn count(tx: &mut Transaction<'_, Postgres>) -> Result<i64> {
        sqlx::query("LOCK TABLE users IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut **tx)
            .await?;

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&mut **tx)
            .await?;

        Ok(count)
    }

    /// Check if a uid or email is already registered
    pub async fn exists(tx: &mut Transaction<'_, Postgres>, uid: &str, email: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE uid = $1 OR email = $2)
            "#,
        )
        .bind(uid)
        .bind(email)
        .fetch_one(&mut **tx)
        .await?;

        Ok(exists)
    }

    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        uid: &str,
        email: &str,
        role: Role,
    ) -> Result<UserRecord> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (uid, email, role, status)
            VALUES ($1, $2, $3, $4)
            RETURNING uid, email, role, status, created_at
            "#,
        )
        .bind(uid)
        .bind(email)
        .bind(role.as_str())
        .bind(Status::Active.as_str())
        .fetch_one(&mut **tx)
        .await?;

        Ok(user)
    }

    /// Find user by uid
    pub async fn find_by_uid(pool: &PgPool, uid: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT uid, email, role, status, created_at
            FROM users
            WHERE uid = $1
            "#,
        )
        .bind(uid)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<UserRecord>> {
        let users = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT uid, email, role, status, created_at
            FROM users
            ORDER BY created_at, uid
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Set the status, returning the updated row if the user exists
    pub async fn update_status(
        pool: &PgPool,
        uid: &str,
        status: Status,
    ) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users SET status = $2
            WHERE uid = $1
            RETURNING uid, email, role, status, created_at
            "#,
        )
        .bind(uid)
        .bind(status.as_str())
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
