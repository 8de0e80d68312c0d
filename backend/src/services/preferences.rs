use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::repositories::{PreferencesRepository, UserPreferencesRecord};
use recipedash_shared::{
    CuisineType, DietaryPreferenceType, UserPreferencesRequest, UserPreferencesResponse,
};
use sqlx::PgPool;

fn to_record(user_id: &str, request: UserPreferencesRequest) -> UserPreferencesRecord {
    UserPreferencesRecord {
        user_id: user_id.to_string(),
        preferred_ingredients: request.preferred_ingredients.unwrap_or_default(),
        cuisine: request.cuisine.map(|c| c.name().to_string()),
        dietary_preferences: request
            .dietary_preferences
            .unwrap_or_default()
            .iter()
            .map(|p| p.name().to_string())
            .collect(),
        exclude_disliked: request.exclude_disliked,
    }
}

fn to_response(record: UserPreferencesRecord) -> UserPreferencesResponse {
    UserPreferencesResponse {
        preferred_ingredients: record.preferred_ingredients,
        cuisine: record.cuisine.as_deref().and_then(CuisineType::from_name),
        dietary_preferences: record
            .dietary_preferences
            .iter()
            .filter_map(|name| DietaryPreferenceType::from_name(name))
            .collect(),
        exclude_disliked: record.exclude_disliked,
    }
}

pub struct PreferencesService;

impl PreferencesService {
    pub async fn save_user_preferences(
        pool: &PgPool,
        caller: &CurrentUser,
        request: UserPreferencesRequest,
    ) -> Result<UserPreferencesResponse, ApiError> {
        let saved = PreferencesRepository::upsert(pool, &to_record(&caller.uid, request))
            .await
            .map_err(ApiError::Internal)?;

        Ok(to_response(saved))
    }

    /// Stored preferences, or the empty defaults
    pub async fn get_user_preferences(
        pool: &PgPool,
        caller: &CurrentUser,
    ) -> Result<UserPreferencesResponse, ApiError> {
        let record = PreferencesRepository::find(pool, &caller.uid)
            .await
            .map_err(ApiError::Internal)?;

        Ok(record.map(to_response).unwrap_or_else(UserPreferencesResponse::empty))
    }
}
