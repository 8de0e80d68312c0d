//! Input validation functions
//!
//! Custom validators plugged into `validator` derive attributes on the
//! request types in [`crate::types`].

use std::borrow::Cow;
use validator::ValidationError;

pub const MAX_STEP_LENGTH: usize = 5000;
pub const MAX_SEARCH_INGREDIENT_LENGTH: usize = 50;

fn error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

/// Reject empty or whitespace-only strings
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "must not be blank".to_string()));
    }
    Ok(())
}

/// Each recipe step must be at most 5000 characters
pub fn validate_steps(steps: &[String]) -> Result<(), ValidationError> {
    if steps.iter().any(|s| s.chars().count() > MAX_STEP_LENGTH) {
        return Err(error(
            "step_length",
            format!("Each step must be at most {} characters", MAX_STEP_LENGTH),
        ));
    }
    Ok(())
}

/// Each ingredient in a search must be at most 50 characters
pub fn validate_search_ingredients(ingredients: &[String]) -> Result<(), ValidationError> {
    if ingredients
        .iter()
        .any(|i| i.chars().count() > MAX_SEARCH_INGREDIENT_LENGTH)
    {
        return Err(error(
            "ingredient_length",
            format!(
                "Ingredient must be at most {} characters",
                MAX_SEARCH_INGREDIENT_LENGTH
            ),
        ));
    }
    Ok(())
}
