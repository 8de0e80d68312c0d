//! Tasty search, filtering and detail mapping
//!
//! Tasty only takes a free-text query, so the remaining criteria are applied
//! to the first page of results.

use crate::error::ApiError;
use crate::external::{TastyClient, TastyRecipe};
use recipedash_shared::{
    AllSourcesSearchCriteria, CuisineType, DietaryPreferenceType, ExternalIngredient,
    ExternalRecipeDetails, ExternalRecipeSummary,
};
use tracing::warn;

const UNAVAILABLE: &str = "Tasty API is currently unavailable";
const CANONICAL_ID_PREFIX: &str = "recipe:";

/// Free-text query for `recipes/list`
pub fn build_query(criteria: &AllSourcesSearchCriteria) -> String {
    if let Some(ingredient) = criteria.ingredients.first() {
        ingredient.clone()
    } else if let Some(cuisine) = criteria.cuisine {
        cuisine.name().to_lowercase()
    } else if let Some(preference) = criteria.dietary_preferences.first() {
        preference.name().to_lowercase()
    } else {
        String::new()
    }
}

/// First `cuisine` tag mapped by canonical name
pub fn recipe_cuisine(recipe: &TastyRecipe) -> CuisineType {
    recipe
        .tag_names("cuisine")
        .next()
        .and_then(CuisineType::from_name)
        .unwrap_or(CuisineType::Other)
}

pub fn recipe_preferences(recipe: &TastyRecipe) -> Vec<DietaryPreferenceType> {
    recipe
        .tag_names("dietary")
        .filter_map(DietaryPreferenceType::from_name)
        .collect()
}

fn matches_cuisine(criteria: &AllSourcesSearchCriteria, recipe: &TastyRecipe) -> bool {
    criteria
        .cuisine
        .map_or(true, |cuisine| recipe_cuisine(recipe) == cuisine)
}

/// Any requested preference is tagged on the recipe
fn matches_preferences(criteria: &AllSourcesSearchCriteria, recipe: &TastyRecipe) -> bool {
    if criteria.dietary_preferences.is_empty() {
        return true;
    }
    let tagged = recipe_preferences(recipe);
    criteria
        .dietary_preferences
        .iter()
        .any(|p| tagged.contains(p))
}

/// Every requested ingredient is a substring of some component name
fn matches_ingredients(required: &[String], recipe: &TastyRecipe) -> bool {
    if required.is_empty() {
        return true;
    }
    let names: Vec<String> = recipe
        .components()
        .filter_map(|c| c.ingredient.as_ref()?.name.as_deref())
        .map(str::to_lowercase)
        .collect();

    required
        .iter()
        .all(|wanted| names.iter().any(|name| name.contains(wanted.as_str())))
}

/// Keep complete recipes that satisfy the criteria
pub fn filter_recipes(
    criteria: &AllSourcesSearchCriteria,
    recipes: Vec<TastyRecipe>,
) -> Vec<TastyRecipe> {
    let required: Vec<String> = criteria
        .ingredients
        .iter()
        .map(|i| i.to_lowercase())
        .collect();

    recipes
        .into_iter()
        .filter(|r| r.instructions.is_some() && r.sections.is_some())
        .filter(|r| matches_cuisine(criteria, r))
        .filter(|r| matches_preferences(criteria, r))
        .filter(|r| matches_ingredients(&required, r))
        .collect()
}

fn clean_canonical_id(canonical_id: Option<&str>) -> String {
    let id = canonical_id.unwrap_or_default();
    id.strip_prefix(CANONICAL_ID_PREFIX).unwrap_or(id).to_string()
}

pub fn to_summary(recipe: &TastyRecipe) -> ExternalRecipeSummary {
    ExternalRecipeSummary {
        id: clean_canonical_id(recipe.canonical_id.as_deref()),
        title: recipe.name.clone().unwrap_or_default(),
        image_source: recipe.thumbnail_url.clone(),
    }
}

pub fn to_details(recipe: &TastyRecipe) -> ExternalRecipeDetails {
    let ingredients = recipe
        .components()
        .map(|component| {
            let name = component
                .ingredient
                .as_ref()
                .and_then(|i| i.name.clone())
                .unwrap_or_default();
            let quantity = component
                .measurements
                .as_ref()
                .and_then(|m| m.first())
                .map(|m| {
                    let unit = m.unit.as_ref().and_then(|u| u.name.as_deref()).unwrap_or_default();
                    format!("{} {}", m.quantity.as_deref().unwrap_or_default(), unit)
                        .trim()
                        .to_string()
                })
                .unwrap_or_default();
            ExternalIngredient { name, quantity }
        })
        .collect();

    let steps = recipe
        .instructions
        .iter()
        .flatten()
        .filter_map(|i| i.display_text.clone())
        .collect();

    ExternalRecipeDetails {
        summary: to_summary(recipe),
        ingredients,
        steps,
        cuisine: Some(recipe_cuisine(recipe)),
        dietary_preferences: recipe_preferences(recipe),
    }
}

fn unavailable(error: reqwest::Error) -> ApiError {
    warn!("Tasty request failed: {}", error);
    ApiError::ServiceUnavailable(UNAVAILABLE.to_string())
}

pub struct TastyService;

impl TastyService {
    pub async fn search_meals(
        client: &TastyClient,
        criteria: &AllSourcesSearchCriteria,
    ) -> Result<Vec<ExternalRecipeSummary>, ApiError> {
        let recipes = client
            .list_recipes(&build_query(criteria))
            .await
            .map_err(unavailable)?;

        Ok(filter_recipes(criteria, recipes)
            .iter()
            .map(to_summary)
            .collect())
    }

    pub async fn get_recipe_detail_by_id(
        client: &TastyClient,
        id: &str,
    ) -> Result<ExternalRecipeDetails, ApiError> {
        let recipe = client
            .recipe_info(id)
            .await
            .map_err(unavailable)?
            .filter(|r| r.name.as_deref().is_some_and(|name| !name.is_empty()))
            .ok_or_else(|| ApiError::NotFound(format!("Recipe with id {} not found", id)))?;

        Ok(to_details(&recipe))
    }
}
