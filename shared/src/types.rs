//! API request and response types
//!
//! Field names are camelCase on the wire.

use crate::models::{
    blank_as_none, CuisineType, DietaryPreferenceType, Role, Status, UserOpinion,
};
use crate::validation::{not_blank, validate_search_ingredients, validate_steps};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Users
// ============================================================================

/// Sign-up request, sent once after the identity provider created the account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(custom(function = "not_blank", message = "UID must not be blank"))]
    pub uid: String,
    #[validate(email(message = "Email should be valid"))]
    pub email: String,
}

/// Status change request (admin only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Status,
}

/// User account response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub uid: String,
    pub email: String,
    pub role: Role,
    pub status: Status,
}

// ============================================================================
// Recipes
// ============================================================================

/// Ingredient line inside a recipe create/update request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecipeIngredientRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(
        custom(function = "not_blank", message = "Name cannot be empty"),
        length(max = 50, message = "Ingredient name must be at most 50 characters")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 30, message = "Quantity must be at most 30 characters"))]
    pub quantity: Option<String>,
}

/// Body of recipe create and update requests
///
/// On update, a missing `ingredients` field keeps the stored ingredients,
/// while missing `steps` and `dietaryPreferences` clear them.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[validate(
        custom(function = "not_blank", message = "Recipe title is required"),
        length(max = 100, message = "Title can't exceed 100 characters")
    )]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "Too many ingredients (max 50)"))]
    #[validate(nested)]
    pub ingredients: Option<Vec<RecipeIngredientRequest>>,
    #[serde(default)]
    #[validate(
        length(max = 50, message = "Too many steps (max 50)"),
        custom(function = "validate_steps")
    )]
    pub steps: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 10, message = "You can specify at most 10 dietary preferences"))]
    pub dietary_preferences: Vec<DietaryPreferenceType>,
    #[serde(default)]
    #[validate(length(max = 30, message = "Cooking time must be at most 30 characters"))]
    pub cooking_time: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub cuisine: Option<CuisineType>,
    #[serde(default)]
    pub is_public: bool,
}

/// Ingredient line of a stored recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredientResponse {
    pub id: i64,
    pub name: String,
    pub quantity: Option<String>,
}

/// Recipe list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummaryResponse {
    pub id: i64,
    pub title: String,
    pub image_source: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// Full recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetailsResponse {
    #[serde(flatten)]
    pub summary: RecipeSummaryResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub steps: Vec<String>,
    pub dietary_preferences: Vec<DietaryPreferenceType>,
    pub cooking_time: Option<String>,
    pub cuisine: Option<CuisineType>,
}

/// Recipe list entry with the owner's email, for the admin listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRecipeResponse {
    #[serde(flatten)]
    pub summary: RecipeSummaryResponse,
    pub user_email: Option<String>,
}

/// Filters over stored recipes (own recipes and admin listing)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSearchCriteria {
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub cuisine: Option<CuisineType>,
    #[serde(default)]
    pub dietary_preferences: Vec<DietaryPreferenceType>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

impl RecipeSearchCriteria {
    /// True when no filter is set
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
            && self.cuisine.is_none()
            && self.dietary_preferences.is_empty()
            && self.is_public.is_none()
    }

    /// Split comma-separated ingredient values and drop blanks
    pub fn normalized(mut self) -> Self {
        self.ingredients = split_list(self.ingredients);
        self
    }
}

// ============================================================================
// Search across sources
// ============================================================================

/// Query for the cross-source search
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AllSourcesSearchCriteria {
    #[serde(default)]
    #[validate(
        length(max = 10, message = "Maximum 10 ingredients allowed"),
        custom(function = "validate_search_ingredients")
    )]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub cuisine: Option<CuisineType>,
    #[serde(default)]
    pub dietary_preferences: Vec<DietaryPreferenceType>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub exclude_disliked: Option<bool>,
}

impl AllSourcesSearchCriteria {
    pub fn normalized(mut self) -> Self {
        self.ingredients = split_list(self.ingredients);
        self
    }

    /// Restriction to stored recipes, public only
    pub fn to_public_recipe_criteria(&self) -> RecipeSearchCriteria {
        RecipeSearchCriteria {
            ingredients: self.ingredients.clone(),
            cuisine: self.cuisine,
            dietary_preferences: self.dietary_preferences.clone(),
            is_public: Some(true),
        }
    }
}

fn split_list(values: Vec<String>) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// One hit of the cross-source search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecipeResponse {
    pub id: String,
    pub title: String,
    pub image_source: Option<String>,
    pub source: String,
}

// ============================================================================
// External recipes
// ============================================================================

/// Ingredient line of an external recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIngredient {
    pub name: String,
    pub quantity: String,
}

/// External recipe list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalRecipeSummary {
    pub id: String,
    pub title: String,
    pub image_source: Option<String>,
}

/// External recipe, normalized from MealDB or Tasty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalRecipeDetails {
    #[serde(flatten)]
    pub summary: ExternalRecipeSummary,
    pub ingredients: Vec<ExternalIngredient>,
    pub steps: Vec<String>,
    pub cuisine: Option<CuisineType>,
    pub dietary_preferences: Vec<DietaryPreferenceType>,
}

// ============================================================================
// Opinions
// ============================================================================

/// Like/dislike/neutral vote
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOpinionRequest {
    pub user_opinion: UserOpinion,
}

/// Aggregated votes for one recipe, plus the caller's own vote if known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRatingResponse {
    pub recipe_id: String,
    pub recipe_source: String,
    pub likes: i64,
    pub dislikes: i64,
    pub neutral: i64,
    pub user_opinion: Option<UserOpinion>,
}

impl RecipeRatingResponse {
    pub fn empty(recipe_id: &str, recipe_source: &str) -> Self {
        Self {
            recipe_id: recipe_id.to_string(),
            recipe_source: recipe_source.to_string(),
            likes: 0,
            dislikes: 0,
            neutral: 0,
            user_opinion: None,
        }
    }
}

// ============================================================================
// User ingredients and preferences
// ============================================================================

/// Add an ingredient to the caller's pantry
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserIngredientRequest {
    #[validate(custom(function = "not_blank", message = "Ingredient cannot be blank"))]
    pub ingredient: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIngredientResponse {
    pub id: i64,
    pub ingredient: String,
}

/// Saved search defaults. Null lists are stored as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferencesRequest {
    #[serde(default)]
    pub preferred_ingredients: Option<Vec<String>>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub cuisine: Option<CuisineType>,
    #[serde(default)]
    pub dietary_preferences: Option<Vec<DietaryPreferenceType>>,
    #[serde(default)]
    pub exclude_disliked: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferencesResponse {
    pub preferred_ingredients: Vec<String>,
    pub cuisine: Option<CuisineType>,
    pub dietary_preferences: Vec<DietaryPreferenceType>,
    pub exclude_disliked: Option<bool>,
}

impl UserPreferencesResponse {
    /// Defaults for a user who never saved preferences
    pub fn empty() -> Self {
        Self {
            preferred_ingredients: Vec::new(),
            cuisine: None,
            dietary_preferences: Vec::new(),
            exclude_disliked: Some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_recipe() -> RecipeRequest {
        RecipeRequest {
            title: "Shakshuka".to_string(),
            ingredients: Some(vec![RecipeIngredientRequest {
                id: None,
                name: "Eggs".to_string(),
                quantity: Some("4".to_string()),
            }]),
            steps: vec!["Simmer the sauce".to_string(), "Crack in the eggs".to_string()],
            dietary_preferences: vec![DietaryPreferenceType::Vegetarian],
            cooking_time: Some("30 min".to_string()),
            cuisine: Some(CuisineType::MiddleEastern),
            is_public: true,
        }
    }

    #[test]
    fn test_recipe_request_valid() {
        assert!(valid_recipe().validate().is_ok());
    }

    #[test]
    fn test_recipe_request_blank_title() {
        let mut recipe = valid_recipe();
        recipe.title = "   ".to_string();
        let errors = recipe.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_recipe_request_title_too_long() {
        let mut recipe = valid_recipe();
        recipe.title = "a".repeat(101);
        assert!(recipe.validate().is_err());
    }

    #[test]
    fn test_recipe_request_nested_ingredient_invalid() {
        let mut recipe = valid_recipe();
        recipe.ingredients = Some(vec![RecipeIngredientRequest {
            id: None,
            name: String::new(),
            quantity: None,
        }]);
        assert!(recipe.validate().is_err());
    }

    #[test]
    fn test_recipe_request_too_many_preferences() {
        let mut recipe = valid_recipe();
        recipe.dietary_preferences = vec![DietaryPreferenceType::Vegan; 11];
        assert!(recipe.validate().is_err());
    }

    #[test]
    fn test_recipe_request_wire_format() {
        let json = r#"{
            "title": "Tacos",
            "steps": ["Warm tortillas"],
            "dietaryPreferences": ["Gluten-Free"],
            "cookingTime": "15 min",
            "cuisine": "Central South American",
            "isPublic": true
        }"#;
        let recipe: RecipeRequest = serde_json::from_str(json).unwrap();
        assert!(recipe.is_public);
        assert!(recipe.ingredients.is_none());
        assert_eq!(recipe.cuisine, Some(CuisineType::CentralSouthAmerican));
        assert_eq!(recipe.dietary_preferences, vec![DietaryPreferenceType::GlutenFree]);
    }

    #[test]
    fn test_sign_up_email_validation() {
        let ok = SignUpRequest {
            uid: "abc".to_string(),
            email: "cook@example.com".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = SignUpRequest {
            uid: " ".to_string(),
            email: "not-an-email".to_string(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("uid"));
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_search_criteria_limits() {
        let criteria = AllSourcesSearchCriteria {
            ingredients: (0..11).map(|i| format!("ing{}", i)).collect(),
            ..Default::default()
        };
        assert!(criteria.validate().is_err());

        let criteria = AllSourcesSearchCriteria {
            ingredients: vec!["x".repeat(51)],
            ..Default::default()
        };
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn test_criteria_normalization() {
        let criteria = RecipeSearchCriteria {
            ingredients: vec!["tomato, basil".to_string(), " ".to_string()],
            ..Default::default()
        }
        .normalized();
        assert_eq!(criteria.ingredients, vec!["tomato", "basil"]);
        assert!(!criteria.is_empty());
        assert!(RecipeSearchCriteria::default().is_empty());
    }

    #[test]
    fn test_details_flatten_summary() {
        let details = RecipeDetailsResponse {
            summary: RecipeSummaryResponse {
                id: 7,
                title: "Soup".to_string(),
                image_source: None,
                is_public: false,
                created_at: Utc::now(),
            },
            ingredients: vec![],
            steps: vec![],
            dietary_preferences: vec![],
            cooking_time: None,
            cuisine: None,
        };
        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["isPublic"], false);
        assert!(value.get("summary").is_none());
    }

    #[test]
    fn test_empty_preferences() {
        let prefs = UserPreferencesResponse::empty();
        assert_eq!(prefs.exclude_disliked, Some(false));
        assert!(prefs.preferred_ingredients.is_empty());
    }
}
