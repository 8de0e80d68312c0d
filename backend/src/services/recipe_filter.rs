//! In-memory matching of stored recipes against search criteria

use crate::repositories::{RecipeIngredientRecord, RecipeRecord};
use recipedash_shared::RecipeSearchCriteria;

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Every requested ingredient equals (trimmed, case-insensitive) one of the
/// recipe's ingredient names
pub fn matches_ingredients(criteria: &RecipeSearchCriteria, ingredients: &[RecipeIngredientRecord]) -> bool {
    if criteria.ingredients.is_empty() {
        return true;
    }
    let names: Vec<String> = ingredients.iter().map(|i| normalize(&i.name)).collect();
    criteria
        .ingredients
        .iter()
        .map(|wanted| normalize(wanted))
        .all(|wanted| names.contains(&wanted))
}

pub fn matches_cuisine(criteria: &RecipeSearchCriteria, recipe: &RecipeRecord) -> bool {
    match criteria.cuisine {
        Some(cuisine) => recipe.cuisine.as_deref() == Some(cuisine.name()),
        None => true,
    }
}

/// The recipe carries every requested dietary preference
pub fn matches_dietary_preferences(criteria: &RecipeSearchCriteria, recipe: &RecipeRecord) -> bool {
    criteria
        .dietary_preferences
        .iter()
        .all(|pref| recipe.dietary_preferences.iter().any(|p| p == pref.name()))
}

pub fn matches_visibility(criteria: &RecipeSearchCriteria, recipe: &RecipeRecord) -> bool {
    criteria.is_public.map_or(true, |public| recipe.is_public == public)
}

/// All criteria hold for the recipe
pub fn matches(
    criteria: &RecipeSearchCriteria,
    recipe: &RecipeRecord,
    ingredients: &[RecipeIngredientRecord],
) -> bool {
    matches_visibility(criteria, recipe)
        && matches_cuisine(criteria, recipe)
        && matches_dietary_preferences(criteria, recipe)
        && matches_ingredients(criteria, ingredients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;
    use recipedash_shared::{CuisineType, DietaryPreferenceType};

    fn recipe(cuisine: Option<CuisineType>, prefs: &[DietaryPreferenceType], public: bool) -> RecipeRecord {
        RecipeRecord {
            id: 1,
            user_id: "u1".to_string(),
            title: "Test".to_string(),
            image_source: None,
            steps: vec![],
            is_public: public,
            dietary_preferences: prefs.iter().map(|p| p.name().to_string()).collect(),
            cooking_time: None,
            cuisine: cuisine.map(|c| c.name().to_string()),
            created_at: Utc::now(),
        }
    }

    fn ingredient(name: &str) -> RecipeIngredientRecord {
        RecipeIngredientRecord {
            id: 1,
            recipe_id: 1,
            position: 0,
            name: name.to_string(),
            quantity: None,
        }
    }

    #[test]
    fn test_ingredient_match_is_exact_after_normalizing() {
        let ingredients = vec![ingredient(" Tomato "), ingredient("Basil")];
        let criteria = RecipeSearchCriteria {
            ingredients: vec!["tomato".to_string(), "BASIL ".to_string()],
            ..Default::default()
        };
        assert!(matches_ingredients(&criteria, &ingredients));

        let partial = RecipeSearchCriteria {
            ingredients: vec!["tom".to_string()],
            ..Default::default()
        };
        assert!(!matches_ingredients(&partial, &ingredients));
    }

    #[test]
    fn test_all_ingredients_required() {
        let ingredients = vec![ingredient("Egg")];
        let criteria = RecipeSearchCriteria {
            ingredients: vec!["egg".to_string(), "flour".to_string()],
            ..Default::default()
        };
        assert!(!matches_ingredients(&criteria, &ingredients));
    }

    #[test]
    fn test_cuisine_and_preferences() {
        let r = recipe(
            Some(CuisineType::Asian),
            &[DietaryPreferenceType::Vegan, DietaryPreferenceType::GlutenFree],
            true,
        );
        let criteria = RecipeSearchCriteria {
            cuisine: Some(CuisineType::Asian),
            dietary_preferences: vec![DietaryPreferenceType::Vegan],
            ..Default::default()
        };
        assert!(matches(&criteria, &r, &[]));

        let wrong_cuisine = RecipeSearchCriteria {
            cuisine: Some(CuisineType::European),
            ..Default::default()
        };
        assert!(!matches(&wrong_cuisine, &r, &[]));

        let extra_pref = RecipeSearchCriteria {
            dietary_preferences: vec![DietaryPreferenceType::DairyFree],
            ..Default::default()
        };
        assert!(!matches(&extra_pref, &r, &[]));
    }

    #[test]
    fn test_visibility_filter() {
        let private = recipe(None, &[], false);
        let public_only = RecipeSearchCriteria {
            is_public: Some(true),
            ..Default::default()
        };
        assert!(!matches(&public_only, &private, &[]));

        let private_only = RecipeSearchCriteria {
            is_public: Some(false),
            ..Default::default()
        };
        assert!(matches(&private_only, &private, &[]));
    }

    fn any_cuisine() -> impl Strategy<Value = Option<CuisineType>> {
        proptest::option::of(proptest::sample::select(CuisineType::ALL.to_vec()))
    }

    fn any_prefs() -> impl Strategy<Value = Vec<DietaryPreferenceType>> {
        proptest::sample::subsequence(DietaryPreferenceType::ALL.to_vec(), 0..=4)
    }

    proptest! {
        #[test]
        fn prop_empty_criteria_never_filter(
            cuisine in any_cuisine(),
            prefs in any_prefs(),
            public in any::<bool>(),
            names in proptest::collection::vec("[a-z]{1,10}", 0..5),
        ) {
            let r = recipe(cuisine, &prefs, public);
            let ingredients: Vec<_> = names.iter().map(|n| ingredient(n)).collect();
            prop_assert!(matches(&RecipeSearchCriteria::default(), &r, &ingredients));
        }

        #[test]
        fn prop_recipe_matches_its_own_attributes(
            cuisine in any_cuisine(),
            prefs in any_prefs(),
            public in any::<bool>(),
            names in proptest::collection::vec("[a-zA-Z ]{1,12}", 0..5),
        ) {
            let r = recipe(cuisine, &prefs, public);
            let ingredients: Vec<_> = names.iter().map(|n| ingredient(n)).collect();
            let criteria = RecipeSearchCriteria {
                ingredients: names.clone(),
                cuisine,
                dietary_preferences: prefs.clone(),
                is_public: Some(public),
            };
            prop_assert!(matches(&criteria, &r, &ingredients));
        }
    }
}
