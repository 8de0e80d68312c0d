//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod opinion;
pub mod preferences;
pub mod recipe;
pub mod user;
pub mod user_ingredient;

pub use opinion::{OpinionCounts, OpinionRepository};
pub use preferences::{PreferencesRepository, UserPreferencesRecord};
pub use recipe::{
    NewIngredient, RecipeFields, RecipeIngredientRecord, RecipeRecord, RecipeRepository,
    RecipeWithOwnerRecord,
};
pub use user::{UserRecord, UserRepository};
pub use user_ingredient::{UserIngredientRecord, UserIngredientRepository};
