use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::repositories::UserIngredientRepository;
use recipedash_shared::{UserIngredientRequest, UserIngredientResponse};
use sqlx::PgPool;
use validator::Validate;

pub struct UserIngredientService;

impl UserIngredientService {
    pub async fn create_user_ingredient(
        pool: &PgPool,
        caller: &CurrentUser,
        request: UserIngredientRequest,
    ) -> Result<UserIngredientResponse, ApiError> {
        request.validate()?;

        let record = UserIngredientRepository::create(pool, &caller.uid, request.ingredient.trim())
            .await
            .map_err(ApiError::Internal)?;

        Ok(record.into())
    }

    pub async fn get_user_ingredients(
        pool: &PgPool,
        caller: &CurrentUser,
    ) -> Result<Vec<UserIngredientResponse>, ApiError> {
        let records = UserIngredientRepository::find_by_user(pool, &caller.uid)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(UserIngredientResponse::from).collect())
    }

    /// Delete one of the caller's ingredients
    pub async fn delete_user_ingredient(
        pool: &PgPool,
        caller: &CurrentUser,
        id: i64,
    ) -> Result<(), ApiError> {
        let record = UserIngredientRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound(format!("Ingredient with id {} not found", id)))?;

        if record.user_id != caller.uid {
            return Err(ApiError::Forbidden(
                "You are not allowed to delete this ingredient".to_string(),
            ));
        }

        UserIngredientRepository::delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(())
    }
}
