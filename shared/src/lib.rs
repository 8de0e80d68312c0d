//! RecipeDash Shared Library
//!
//! This crate contains the enumerations, request/response types and
//! validation helpers used by the backend and its clients.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{CuisineType, DietaryPreferenceType, RecipeSource, Role, Status, UserOpinion};
pub use types::*;
