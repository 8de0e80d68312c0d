use super::extract::SearchQuery;
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::services::AdminRecipeService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use recipedash_shared::{AdminRecipeResponse, RecipeSearchCriteria};

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/recipes", get(list_all_recipes))
}

/// GET /api/v1/admin/recipes - Every user's recipes with owner emails
async fn list_all_recipes(
    State(state): State<AppState>,
    user: CurrentUser,
    SearchQuery(criteria): SearchQuery<RecipeSearchCriteria>,
) -> Result<Json<Vec<AdminRecipeResponse>>, ApiError> {
    let recipes =
        AdminRecipeService::search_all_recipes(state.db(), &user, &criteria.normalized()).await?;
    Ok(Json(recipes))
}
