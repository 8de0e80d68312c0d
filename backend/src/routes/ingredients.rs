//! Pantry ingredient routes

use super::extract::ApiJson;
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::services::UserIngredientService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use recipedash_shared::{UserIngredientRequest, UserIngredientResponse};

pub fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ingredients).post(create_ingredient))
        .route("/:id", delete(delete_ingredient))
}

async fn create_ingredient(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(req): ApiJson<UserIngredientRequest>,
) -> Result<(StatusCode, Json<UserIngredientResponse>), ApiError> {
    let ingredient = UserIngredientService::create_user_ingredient(state.db(), &user, req).await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

async fn list_ingredients(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<UserIngredientResponse>>, ApiError> {
    Ok(Json(UserIngredientService::get_user_ingredients(state.db(), &user).await?))
}

async fn delete_ingredient(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    UserIngredientService::delete_user_ingredient(state.db(), &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
