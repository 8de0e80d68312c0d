//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the external recipe catalogs.

pub mod admin_recipe;
pub mod mealdb;
pub mod opinion;
pub mod preferences;
pub mod recipe;
pub mod recipe_filter;
pub mod search;
pub mod tasty;
pub mod user;
pub mod user_ingredient;

pub use admin_recipe::AdminRecipeService;
pub use mealdb::MealDbService;
pub use opinion::OpinionService;
pub use preferences::PreferencesService;
pub use recipe::RecipeService;
pub use search::SearchService;
pub use tasty::TastyService;
pub use user::UserService;
pub use user_ingredient::UserIngredientService;
