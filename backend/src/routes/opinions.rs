//! Recipe rating routes, keyed by source and the source's recipe id

use super::extract::ApiJson;
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::services::OpinionService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::put,
    Json, Router,
};
use recipedash_shared::{RecipeRatingResponse, RecipeSource, SaveOpinionRequest};

pub fn opinion_routes() -> Router<AppState> {
    Router::new().route(
        "/:source/:recipe_id",
        put(save_opinion).get(get_rating).delete(delete_opinion),
    )
}

fn parse_source(source: &str) -> Result<RecipeSource, ApiError> {
    source
        .parse::<RecipeSource>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

async fn save_opinion(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((source, recipe_id)): Path<(String, String)>,
    ApiJson(req): ApiJson<SaveOpinionRequest>,
) -> Result<Json<RecipeRatingResponse>, ApiError> {
    let source = parse_source(&source)?;
    let rating = OpinionService::save_opinion(state.db(), &user, source, &recipe_id, req).await?;
    Ok(Json(rating))
}

async fn get_rating(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((source, recipe_id)): Path<(String, String)>,
) -> Result<Json<RecipeRatingResponse>, ApiError> {
    let source = parse_source(&source)?;
    let rating = OpinionService::get_recipe_rating(state.db(), &user, source, &recipe_id).await?;
    Ok(Json(rating))
}

async fn delete_opinion(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((source, recipe_id)): Path<(String, String)>,
) -> Result<Json<RecipeRatingResponse>, ApiError> {
    let source = parse_source(&source)?;
    let rating = OpinionService::delete_opinion(state.db(), &user, source, &recipe_id).await?;
    Ok(Json(rating))
}
