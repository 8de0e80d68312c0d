//! Likes, dislikes and neutral votes on recipes from any source

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::repositories::{OpinionCounts, OpinionRepository};
use recipedash_shared::{RecipeRatingResponse, RecipeSource, SaveOpinionRequest, UserOpinion};
use sqlx::PgPool;
use std::collections::HashSet;
use tracing::debug;

fn rating(
    recipe_id: &str,
    source: RecipeSource,
    counts: OpinionCounts,
    user_opinion: Option<UserOpinion>,
) -> RecipeRatingResponse {
    RecipeRatingResponse {
        recipe_id: recipe_id.to_string(),
        recipe_source: source.as_str().to_string(),
        likes: counts.likes,
        dislikes: counts.dislikes,
        neutral: counts.neutral,
        user_opinion,
    }
}

pub struct OpinionService;

impl OpinionService {
    /// Store the caller's opinion and return the updated totals
    pub async fn save_opinion(
        pool: &PgPool,
        caller: &CurrentUser,
        source: RecipeSource,
        recipe_id: &str,
        request: SaveOpinionRequest,
    ) -> Result<RecipeRatingResponse, ApiError> {
        OpinionRepository::upsert(pool, &caller.uid, recipe_id, source.as_str(), request.user_opinion)
            .await
            .map_err(ApiError::Internal)?;
        debug!(recipe_id, source = source.as_str(), opinion = request.user_opinion.name(), "Opinion saved");

        let counts = OpinionRepository::counts(pool, recipe_id, source.as_str())
            .await
            .map_err(ApiError::Internal)?;

        Ok(rating(recipe_id, source, counts, Some(request.user_opinion)))
    }

    /// Remove the caller's opinion if there is one
    pub async fn delete_opinion(
        pool: &PgPool,
        caller: &CurrentUser,
        source: RecipeSource,
        recipe_id: &str,
    ) -> Result<RecipeRatingResponse, ApiError> {
        OpinionRepository::delete(pool, &caller.uid, recipe_id, source.as_str())
            .await
            .map_err(ApiError::Internal)?;

        let counts = OpinionRepository::counts(pool, recipe_id, source.as_str())
            .await
            .map_err(ApiError::Internal)?;

        Ok(rating(recipe_id, source, counts, None))
    }

    pub async fn get_recipe_rating(
        pool: &PgPool,
        caller: &CurrentUser,
        source: RecipeSource,
        recipe_id: &str,
    ) -> Result<RecipeRatingResponse, ApiError> {
        let counts = OpinionRepository::counts(pool, recipe_id, source.as_str())
            .await
            .map_err(ApiError::Internal)?;
        let own = OpinionRepository::find(pool, &caller.uid, recipe_id, source.as_str())
            .await
            .map_err(ApiError::Internal)?;

        Ok(rating(recipe_id, source, counts, own))
    }

    /// `(recipe_id, source)` pairs the user disliked
    pub async fn disliked_recipe_keys(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<HashSet<(String, String)>, ApiError> {
        let keys = OpinionRepository::disliked_keys(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(keys.into_iter().collect())
    }
}
