use super::recipe::to_summary;
use super::recipe_filter;
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::repositories::RecipeRepository;
use recipedash_shared::{AdminRecipeResponse, RecipeSearchCriteria};
use sqlx::PgPool;
use std::collections::HashMap;

pub struct AdminRecipeService;

impl AdminRecipeService {
    /// Every recipe of every user with the owner's email, optionally filtered
    pub async fn search_all_recipes(
        pool: &PgPool,
        caller: &CurrentUser,
        criteria: &RecipeSearchCriteria,
    ) -> Result<Vec<AdminRecipeResponse>, ApiError> {
        caller.require_admin()?;

        let records = RecipeRepository::find_all_with_owner(pool)
            .await
            .map_err(ApiError::Internal)?;

        let ingredients = if criteria.ingredients.is_empty() {
            HashMap::new()
        } else {
            let ids: Vec<i64> = records.iter().map(|r| r.recipe.id).collect();
            RecipeRepository::ingredients_for(pool, &ids)
                .await
                .map_err(ApiError::Internal)?
        };

        Ok(records
            .into_iter()
            .filter(|r| {
                criteria.is_empty() || {
                    let lines = ingredients.get(&r.recipe.id).map(Vec::as_slice).unwrap_or(&[]);
                    recipe_filter::matches(criteria, &r.recipe, lines)
                }
            })
            .map(|r| AdminRecipeResponse {
                summary: to_summary(&r.recipe),
                user_email: r.user_email,
            })
            .collect())
    }
}
