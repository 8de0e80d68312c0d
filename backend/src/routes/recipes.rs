//! Recipe routes, including the cross-source search

use super::extract::{ApiJson, SearchQuery};
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::services::{RecipeService, SearchService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use recipedash_shared::{
    AllSourcesSearchCriteria, RecipeDetailsResponse, RecipeRequest, RecipeSearchCriteria,
    RecipeSummaryResponse, SearchRecipeResponse,
};

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_recipes).post(create_recipe))
        .route("/search", get(search_all_sources))
        .route("/:id", get(get_recipe).put(update_recipe).delete(delete_recipe))
}

/// GET /api/v1/recipes - The caller's recipes, optionally filtered
async fn list_recipes(
    State(state): State<AppState>,
    user: CurrentUser,
    SearchQuery(criteria): SearchQuery<RecipeSearchCriteria>,
) -> Result<Json<Vec<RecipeSummaryResponse>>, ApiError> {
    let recipes =
        RecipeService::search_recipes_for_user(state.db(), &user, &criteria.normalized()).await?;
    Ok(Json(recipes))
}

/// GET /api/v1/recipes/search - MealDB, Tasty and public user recipes
async fn search_all_sources(
    State(state): State<AppState>,
    user: CurrentUser,
    SearchQuery(criteria): SearchQuery<AllSourcesSearchCriteria>,
) -> Result<Json<Vec<SearchRecipeResponse>>, ApiError> {
    Ok(Json(SearchService::search_recipes(&state, &user, criteria).await?))
}

async fn get_recipe(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDetailsResponse>, ApiError> {
    Ok(Json(RecipeService::get_recipe_by_id(state.db(), id).await?))
}

async fn create_recipe(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(req): ApiJson<RecipeRequest>,
) -> Result<(StatusCode, Json<RecipeDetailsResponse>), ApiError> {
    let recipe = RecipeService::create_recipe(state.db(), &user, req).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

async fn update_recipe(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<RecipeRequest>,
) -> Result<Json<RecipeDetailsResponse>, ApiError> {
    Ok(Json(RecipeService::update_recipe(state.db(), &user, id, req).await?))
}

async fn delete_recipe(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    RecipeService::delete_recipe(state.db(), &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
