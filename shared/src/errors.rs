//! Error types for the RecipeDash shared crate

use thiserror::Error;

/// Failure to interpret a string as one of the shared enumerations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    #[error("Unknown cuisine type: {0}")]
    Cuisine(String),

    #[error("Unknown dietary preference type: {0}")]
    DietaryPreference(String),

    #[error("Unknown opinion: {0}")]
    Opinion(String),

    #[error("Unknown role: {0}")]
    Role(String),

    #[error("Unknown status: {0}")]
    Status(String),

    #[error("Unknown recipe source: {0}")]
    Source(String),
}
