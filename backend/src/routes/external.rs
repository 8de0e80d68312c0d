//! Detail views of recipes from the third-party catalogs

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::services::{MealDbService, TastyService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use recipedash_shared::ExternalRecipeDetails;

pub fn mealdb_routes() -> Router<AppState> {
    Router::new().route("/:id", get(get_meal))
}

pub fn tasty_routes() -> Router<AppState> {
    Router::new().route("/:id", get(get_tasty_recipe))
}

/// GET /api/v1/mealdb/:id
async fn get_meal(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ExternalRecipeDetails>, ApiError> {
    Ok(Json(MealDbService::get_recipe_detail_by_id(&state.mealdb, &id).await?))
}

/// GET /api/v1/tasty/:id
async fn get_tasty_recipe(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ExternalRecipeDetails>, ApiError> {
    Ok(Json(TastyService::get_recipe_detail_by_id(&state.tasty, &id).await?))
}
