//! Combined search over MealDB, Tasty and public user recipes

use super::{MealDbService, OpinionService, RecipeService, TastyService};
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;
use recipedash_shared::{
    AllSourcesSearchCriteria, ExternalRecipeSummary, RecipeSource, RecipeSummaryResponse,
    SearchRecipeResponse,
};
use std::collections::HashSet;
use tracing::debug;
use validator::Validate;

/// Whether results from `source` were asked for. An unrecognised filter
/// selects nothing.
fn wants(criteria: &AllSourcesSearchCriteria, source: RecipeSource) -> bool {
    criteria
        .source
        .as_deref()
        .map_or(true, |s| s.trim().eq_ignore_ascii_case(source.as_str()))
}

fn from_external(recipe: ExternalRecipeSummary, source: RecipeSource) -> SearchRecipeResponse {
    SearchRecipeResponse {
        id: recipe.id,
        title: recipe.title,
        image_source: recipe.image_source,
        source: source.as_str().to_string(),
    }
}

fn from_user_recipe(recipe: RecipeSummaryResponse) -> SearchRecipeResponse {
    SearchRecipeResponse {
        id: recipe.id.to_string(),
        title: recipe.title,
        image_source: recipe.image_source,
        source: RecipeSource::User.as_str().to_string(),
    }
}

fn exclude_disliked(
    results: Vec<SearchRecipeResponse>,
    disliked: &HashSet<(String, String)>,
) -> Vec<SearchRecipeResponse> {
    results
        .into_iter()
        .filter(|r| !disliked.contains(&(r.id.clone(), r.source.clone())))
        .collect()
}

pub struct SearchService;

impl SearchService {
    /// Results in source order: MealDB, Tasty, then public user recipes
    pub async fn search_recipes(
        state: &AppState,
        caller: &CurrentUser,
        criteria: AllSourcesSearchCriteria,
    ) -> Result<Vec<SearchRecipeResponse>, ApiError> {
        let criteria = criteria.normalized();
        criteria.validate()?;

        let mut results = Vec::new();

        if wants(&criteria, RecipeSource::MealDb) {
            let meals = MealDbService::search_meals(&state.mealdb, &criteria).await?;
            results.extend(meals.into_iter().map(|m| from_external(m, RecipeSource::MealDb)));
        }

        if wants(&criteria, RecipeSource::Tasty) {
            let recipes = TastyService::search_meals(&state.tasty, &criteria).await?;
            results.extend(recipes.into_iter().map(|r| from_external(r, RecipeSource::Tasty)));
        }

        if wants(&criteria, RecipeSource::User) {
            let recipes =
                RecipeService::search_public_recipes(state.db(), &criteria.to_public_recipe_criteria())
                    .await?;
            results.extend(recipes.into_iter().map(from_user_recipe));
        }

        if criteria.exclude_disliked == Some(true) {
            let disliked = OpinionService::disliked_recipe_keys(state.db(), &caller.uid).await?;
            results = exclude_disliked(results, &disliked);
        }

        debug!(count = results.len(), user = %caller.uid, "Search complete");
        Ok(results)
    }
}
