//! User recipes: CRUD, ownership checks and searches over stored recipes

use super::recipe_filter;
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::repositories::{
    NewIngredient, RecipeFields, RecipeIngredientRecord, RecipeRecord, RecipeRepository,
};
use recipedash_shared::{
    CuisineType, DietaryPreferenceType, RecipeDetailsResponse, RecipeIngredientRequest,
    RecipeIngredientResponse, RecipeRequest, RecipeSearchCriteria, RecipeSummaryResponse,
};
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::info;
use validator::Validate;

pub fn to_summary(record: &RecipeRecord) -> RecipeSummaryResponse {
    RecipeSummaryResponse {
        id: record.id,
        title: record.title.clone(),
        image_source: record.image_source.clone(),
        is_public: record.is_public,
        created_at: record.created_at,
    }
}

pub fn to_details(record: RecipeRecord, ingredients: Vec<RecipeIngredientRecord>) -> RecipeDetailsResponse {
    RecipeDetailsResponse {
        summary: to_summary(&record),
        ingredients: ingredients
            .into_iter()
            .map(|i| RecipeIngredientResponse {
                id: i.id,
                name: i.name,
                quantity: i.quantity,
            })
            .collect(),
        steps: record.steps,
        dietary_preferences: record
            .dietary_preferences
            .iter()
            .filter_map(|name| DietaryPreferenceType::from_name(name))
            .collect(),
        cooking_time: record.cooking_time,
        cuisine: record.cuisine.as_deref().and_then(CuisineType::from_name),
    }
}

fn to_fields(request: &RecipeRequest) -> RecipeFields {
    RecipeFields {
        title: request.title.trim().to_string(),
        steps: request.steps.clone(),
        is_public: request.is_public,
        dietary_preferences: request
            .dietary_preferences
            .iter()
            .map(|p| p.name().to_string())
            .collect(),
        cooking_time: request.cooking_time.clone(),
        cuisine: request.cuisine.map(|c| c.name().to_string()),
    }
}

fn to_new_ingredients(ingredients: &[RecipeIngredientRequest]) -> Vec<NewIngredient> {
    ingredients
        .iter()
        .map(|i| NewIngredient {
            name: i.name.trim().to_string(),
            quantity: i.quantity.clone(),
        })
        .collect()
}

/// Keep the records that satisfy `criteria`
pub async fn filter_records(
    pool: &PgPool,
    records: Vec<RecipeRecord>,
    criteria: &RecipeSearchCriteria,
) -> Result<Vec<RecipeRecord>, ApiError> {
    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    let ingredients = if criteria.ingredients.is_empty() {
        HashMap::new()
    } else {
        RecipeRepository::ingredients_for(pool, &ids)
            .await
            .map_err(ApiError::Internal)?
    };

    Ok(records
        .into_iter()
        .filter(|r| {
            let lines = ingredients.get(&r.id).map(Vec::as_slice).unwrap_or(&[]);
            recipe_filter::matches(criteria, r, lines)
        })
        .collect())
}

pub struct RecipeService;

impl RecipeService {
    pub async fn get_recipes_for_current_user(
        pool: &PgPool,
        caller: &CurrentUser,
    ) -> Result<Vec<RecipeSummaryResponse>, ApiError> {
        let records = RecipeRepository::find_by_user(pool, &caller.uid)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.iter().map(to_summary).collect())
    }

    /// The caller's recipes that satisfy `criteria`
    pub async fn search_recipes_for_user(
        pool: &PgPool,
        caller: &CurrentUser,
        criteria: &RecipeSearchCriteria,
    ) -> Result<Vec<RecipeSummaryResponse>, ApiError> {
        if criteria.is_empty() {
            return Self::get_recipes_for_current_user(pool, caller).await;
        }

        let records = RecipeRepository::find_by_user(pool, &caller.uid)
            .await
            .map_err(ApiError::Internal)?;
        let matching = filter_records(pool, records, criteria).await?;

        Ok(matching.iter().map(to_summary).collect())
    }

    /// Public recipes of every user that satisfy `criteria`
    pub async fn search_public_recipes(
        pool: &PgPool,
        criteria: &RecipeSearchCriteria,
    ) -> Result<Vec<RecipeSummaryResponse>, ApiError> {
        let records = RecipeRepository::find_public(pool)
            .await
            .map_err(ApiError::Internal)?;
        let matching = filter_records(pool, records, criteria).await?;

        Ok(matching.iter().map(to_summary).collect())
    }

    pub async fn get_recipe_by_id(pool: &PgPool, id: i64) -> Result<RecipeDetailsResponse, ApiError> {
        let record = RecipeRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| recipe_not_found(id))?;

        Self::load_details(pool, record).await
    }

    async fn load_details(pool: &PgPool, record: RecipeRecord) -> Result<RecipeDetailsResponse, ApiError> {
        let mut ingredients = RecipeRepository::ingredients_for(pool, &[record.id])
            .await
            .map_err(ApiError::Internal)?;
        let lines = ingredients.remove(&record.id).unwrap_or_default();

        Ok(to_details(record, lines))
    }

    pub async fn create_recipe(
        pool: &PgPool,
        caller: &CurrentUser,
        request: RecipeRequest,
    ) -> Result<RecipeDetailsResponse, ApiError> {
        request.validate()?;

        let ingredients = to_new_ingredients(request.ingredients.as_deref().unwrap_or_default());
        let (record, lines) =
            RecipeRepository::create(pool, &caller.uid, &to_fields(&request), &ingredients)
                .await
                .map_err(ApiError::Internal)?;

        info!(recipe_id = record.id, user = %caller.uid, "Recipe created");
        Ok(to_details(record, lines))
    }

    pub async fn update_recipe(
        pool: &PgPool,
        caller: &CurrentUser,
        id: i64,
        request: RecipeRequest,
    ) -> Result<RecipeDetailsResponse, ApiError> {
        request.validate()?;
        Self::authorize_modification(pool, caller, id).await?;

        let ingredients = request.ingredients.as_deref().map(to_new_ingredients);
        let record = RecipeRepository::update(pool, id, &to_fields(&request), ingredients.as_deref())
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| recipe_not_found(id))?;

        info!(recipe_id = id, user = %caller.uid, "Recipe updated");
        Self::load_details(pool, record).await
    }

    pub async fn delete_recipe(pool: &PgPool, caller: &CurrentUser, id: i64) -> Result<(), ApiError> {
        Self::authorize_modification(pool, caller, id).await?;

        let deleted = RecipeRepository::delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;
        if !deleted {
            return Err(recipe_not_found(id));
        }

        info!(recipe_id = id, user = %caller.uid, "Recipe deleted");
        Ok(())
    }

    /// Admins may change any existing recipe; everyone else only their own.
    /// Non-owners get 403 whether or not the recipe exists.
    async fn authorize_modification(pool: &PgPool, caller: &CurrentUser, id: i64) -> Result<(), ApiError> {
        let owner = RecipeRepository::find_owner(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        check_modification(caller, id, owner.as_deref())
    }
}

fn check_modification(caller: &CurrentUser, id: i64, owner: Option<&str>) -> Result<(), ApiError> {
    match owner {
        _ if !caller.is_admin() && owner != Some(caller.uid.as_str()) => Err(ApiError::Forbidden(
            "You are not allowed to modify this recipe".to_string(),
        )),
        None => Err(recipe_not_found(id)),
        Some(_) => Ok(()),
    }
}

fn recipe_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Recipe with id {} not found", id))
}
