use super::extract::ApiJson;
use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::services::PreferencesService;
use crate::state::AppState;
use axum::{extract::State, routing::put, Json, Router};
use recipedash_shared::{UserPreferencesRequest, UserPreferencesResponse};

pub fn preference_routes() -> Router<AppState> {
    Router::new().route("/", put(save_preferences).get(get_preferences))
}

async fn save_preferences(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(req): ApiJson<UserPreferencesRequest>,
) -> ApiResult<Json<UserPreferencesResponse>> {
    Ok(Json(PreferencesService::save_user_preferences(state.db(), &user, req).await?))
}

async fn get_preferences(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<UserPreferencesResponse>> {
    Ok(Json(PreferencesService::get_user_preferences(state.db(), &user).await?))
}
