//! HTTP clients for the third-party recipe catalogs
//!
//! The clients only speak the upstream wire formats. Mapping into
//! RecipeDash types lives in the corresponding services.

pub mod mealdb;
pub mod tasty;

pub use mealdb::{MealDbClient, MealDetail, MealSummary};
pub use tasty::{TastyClient, TastyRecipe};

use std::time::Instant;

/// Count and time one outbound call
pub(crate) fn record_call<T, E>(
    provider: &'static str,
    endpoint: &'static str,
    started: Instant,
    result: &Result<T, E>,
) {
    let outcome = if result.is_ok() { "success" } else { "error" };
    metrics::counter!(
        "recipedash_upstream_requests_total",
        "provider" => provider,
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "recipedash_upstream_request_duration_seconds",
        "provider" => provider,
        "endpoint" => endpoint
    )
    .record(started.elapsed().as_secs_f64());
}
