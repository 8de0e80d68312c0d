//! User accounts
//!
//! Accounts are created by the identity provider; this service only records
//! them. The first account ever registered becomes the administrator.

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::repositories::UserRepository;
use recipedash_shared::{Role, SignUpRequest, Status, UserResponse};
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

pub struct UserService;

impl UserService {
    /// Register the caller. `token_uid` is the verified token subject.
    pub async fn create_user(
        pool: &PgPool,
        token_uid: &str,
        request: SignUpRequest,
    ) -> Result<UserResponse, ApiError> {
        request.validate()?;

        if request.uid != token_uid {
            return Err(ApiError::Forbidden(
                "UID does not match the authenticated user".to_string(),
            ));
        }

        let mut tx = pool.begin().await?;

        if UserRepository::exists(&mut tx, &request.uid, &request.email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("User already exists".to_string()));
        }

        let role = if UserRepository::count(&mut tx)
            .await
            .map_err(ApiError::Internal)?
            == 0
        {
            Role::Admin
        } else {
            Role::User
        };

        let user = UserRepository::insert(&mut tx, &request.uid, &request.email, role)
            .await
            .map_err(ApiError::Internal)?;
        tx.commit().await?;

        info!(uid = %user.uid, role = user.role.as_str(), "User registered");
        Ok(user.into())
    }

    pub async fn get_user_by_uid(pool: &PgPool, uid: &str) -> Result<UserResponse, ApiError> {
        UserRepository::find_by_uid(pool, uid)
            .await
            .map_err(ApiError::Internal)?
            .map(UserResponse::from)
            .ok_or_else(|| ApiError::NotFound(format!("User with uid {} not found", uid)))
    }

    pub async fn get_all_users(
        pool: &PgPool,
        caller: &CurrentUser,
    ) -> Result<Vec<UserResponse>, ApiError> {
        caller.require_admin()?;

        let users = UserRepository::find_all(pool)
            .await
            .map_err(ApiError::Internal)?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Block or unblock an account (admin only)
    pub async fn update_user_status(
        pool: &PgPool,
        caller: &CurrentUser,
        uid: &str,
        status: Status,
    ) -> Result<UserResponse, ApiError> {
        caller.require_admin()?;
        check_status_change(caller, uid, status)?;

        let user = UserRepository::update_status(pool, uid, status)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound(format!("User with uid {} not found", uid)))?;

        info!(uid = %user.uid, status = status.as_str(), by = %caller.uid, "User status changed");
        Ok(user.into())
    }
}

fn check_status_change(caller: &CurrentUser, uid: &str, status: Status) -> Result<(), ApiError> {
    if status == Status::Blocked && caller.uid == uid {
        return Err(ApiError::BadRequest("You cannot block yourself".to_string()));
    }
    Ok(())
}
