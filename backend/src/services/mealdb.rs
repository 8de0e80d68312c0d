//! TheMealDB search and detail mapping
//!
//! MealDB only filters on one attribute per request, so a search issues one
//! request per ingredient, area and category and intersects the results.

use crate::error::ApiError;
use crate::external::{MealDbClient, MealDetail, MealSummary};
use recipedash_shared::{
    AllSourcesSearchCriteria, CuisineType, DietaryPreferenceType, ExternalIngredient,
    ExternalRecipeDetails, ExternalRecipeSummary,
};
use std::collections::BTreeMap;
use tracing::warn;

const UNAVAILABLE: &str = "MealDB API is currently unavailable";

/// Result set keyed by `idMeal`
pub type MealSet = BTreeMap<String, MealSummary>;

/// MealDB areas that make up a broad cuisine
pub fn areas_for(cuisine: CuisineType) -> &'static [&'static str] {
    match cuisine {
        CuisineType::NorthAmerican => &["American", "Canadian"],
        CuisineType::Asian => &[
            "Chinese",
            "Filipino",
            "Indian",
            "Japanese",
            "Malaysian",
            "Thai",
            "Vietnamese",
        ],
        CuisineType::European => &[
            "French",
            "Greek",
            "Croatian",
            "Dutch",
            "Italian",
            "Polish",
            "Portuguese",
            "Russian",
            "Spanish",
            "Ukrainian",
            "British",
            "Irish",
        ],
        CuisineType::Caribbean => &["Jamaican", "Caribbean"],
        CuisineType::African => &["Egyptian", "Kenyan", "Moroccan", "Tunisian"],
        CuisineType::MiddleEastern => &["Turkish", "Middle Eastern"],
        CuisineType::CentralSouthAmerican => {
            &["Mexican", "Uruguayan", "Central American", "South American"]
        }
        CuisineType::Jewish => &["Jewish"],
        CuisineType::Other => &[],
    }
}

/// Broad cuisine of a MealDB area, `Other` when unknown
pub fn cuisine_for_area(area: Option<&str>) -> CuisineType {
    let Some(area) = area.map(str::trim) else {
        return CuisineType::Other;
    };

    CuisineType::ALL
        .into_iter()
        .find(|cuisine| {
            areas_for(*cuisine)
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(area))
        })
        .unwrap_or(CuisineType::Other)
}

/// Preferences implied by a MealDB category
pub fn preferences_for_category(category: Option<&str>) -> Vec<DietaryPreferenceType> {
    match category.map(str::trim) {
        Some(c) if c.eq_ignore_ascii_case("vegan") => {
            vec![DietaryPreferenceType::Vegan, DietaryPreferenceType::Vegetarian]
        }
        Some(c) if c.eq_ignore_ascii_case("vegetarian") => vec![DietaryPreferenceType::Vegetarian],
        _ => Vec::new(),
    }
}

/// MealDB can only filter on vegan and vegetarian
fn has_unsupported_preferences(preferences: &[DietaryPreferenceType]) -> bool {
    preferences.iter().any(|p| {
        !matches!(
            p,
            DietaryPreferenceType::Vegan | DietaryPreferenceType::Vegetarian
        )
    })
}

/// Categories to filter by for the requested preferences
fn categories_for(preferences: &[DietaryPreferenceType]) -> Vec<&'static str> {
    let vegan = preferences.contains(&DietaryPreferenceType::Vegan);
    let vegetarian = preferences.contains(&DietaryPreferenceType::Vegetarian);

    if vegan && vegetarian {
        return vec!["Vegan"];
    }
    preferences
        .iter()
        .filter(|p| {
            matches!(
                p,
                DietaryPreferenceType::Vegan | DietaryPreferenceType::Vegetarian
            )
        })
        .map(|p| p.display_name())
        .collect()
}

/// Meals present in every set
pub fn intersect(mut sets: Vec<MealSet>) -> MealSet {
    if sets.is_empty() {
        return MealSet::new();
    }

    let mut result = sets.swap_remove(0);
    for set in &sets {
        result.retain(|id, _| set.contains_key(id));
    }
    result
}

fn to_set(meals: Vec<MealSummary>) -> MealSet {
    meals
        .into_iter()
        .map(|meal| (meal.id_meal.clone(), meal))
        .collect()
}

fn unavailable(error: reqwest::Error) -> ApiError {
    warn!("MealDB request failed: {}", error);
    ApiError::ServiceUnavailable(UNAVAILABLE.to_string())
}

pub fn to_summary(meal: MealSummary) -> ExternalRecipeSummary {
    ExternalRecipeSummary {
        id: meal.id_meal,
        title: meal.str_meal,
        image_source: meal.str_meal_thumb,
    }
}

pub fn to_details(meal: MealDetail) -> ExternalRecipeDetails {
    let ingredients = meal
        .ingredient_slots()
        .filter_map(|(name, measure)| {
            let name = name.map(str::trim).filter(|n| !n.is_empty())?;
            Some(ExternalIngredient {
                name: name.to_string(),
                quantity: measure.map(str::trim).unwrap_or_default().to_string(),
            })
        })
        .collect();

    let steps = meal
        .str_instructions
        .as_deref()
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    ExternalRecipeDetails {
        cuisine: Some(cuisine_for_area(meal.str_area.as_deref())),
        dietary_preferences: preferences_for_category(meal.str_category.as_deref()),
        ingredients,
        steps,
        summary: ExternalRecipeSummary {
            id: meal.id_meal,
            title: meal.str_meal,
            image_source: meal.str_meal_thumb,
        },
    }
}

pub struct MealDbService;

impl MealDbService {
    /// Meals satisfying every criterion, ordered by id
    pub async fn search_meals(
        client: &MealDbClient,
        criteria: &AllSourcesSearchCriteria,
    ) -> Result<Vec<ExternalRecipeSummary>, ApiError> {
        if has_unsupported_preferences(&criteria.dietary_preferences) {
            return Ok(Vec::new());
        }

        let mut sets = Vec::new();

        for ingredient in &criteria.ingredients {
            let meals = client
                .filter_by_ingredient(ingredient)
                .await
                .map_err(unavailable)?;
            if meals.is_empty() {
                return Ok(Vec::new());
            }
            sets.push(to_set(meals));
        }

        if let Some(cuisine) = criteria.cuisine {
            let mut by_cuisine = MealSet::new();
            for area in areas_for(cuisine) {
                let meals = client.filter_by_area(area).await.map_err(unavailable)?;
                by_cuisine.extend(to_set(meals));
            }
            sets.push(by_cuisine);
        }

        for category in categories_for(&criteria.dietary_preferences) {
            let meals = client
                .filter_by_category(category)
                .await
                .map_err(unavailable)?;
            sets.push(to_set(meals));
        }

        Ok(intersect(sets).into_values().map(to_summary).collect())
    }

    pub async fn get_recipe_detail_by_id(
        client: &MealDbClient,
        id: &str,
    ) -> Result<ExternalRecipeDetails, ApiError> {
        let meal = client
            .lookup(id)
            .await
            .map_err(unavailable)?
            .ok_or_else(|| ApiError::NotFound(format!("Meal with id {} not found", id)))?;

        Ok(to_details(meal))
    }
}
