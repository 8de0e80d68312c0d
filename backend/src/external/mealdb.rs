//! TheMealDB client

use super::record_call;
use crate::config::MealDbConfig;
use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Highest numbered `strIngredientN` / `strMeasureN` pair in a lookup
pub const MAX_INGREDIENT_SLOTS: usize = 20;

/// Wrapper around every MealDB response. `meals` is null when nothing matched.
#[derive(Debug, Deserialize)]
struct MealList<T> {
    meals: Option<Vec<T>>,
}

/// Entry of a `filter.php` result
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSummary {
    pub id_meal: String,
    pub str_meal: String,
    #[serde(default)]
    pub str_meal_thumb: Option<String>,
}

/// Entry of a `lookup.php` result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealDetail {
    pub id_meal: String,
    pub str_meal: String,
    #[serde(default)]
    pub str_meal_thumb: Option<String>,
    #[serde(default)]
    pub str_category: Option<String>,
    #[serde(default)]
    pub str_area: Option<String>,
    #[serde(default)]
    pub str_instructions: Option<String>,
    /// Numbered ingredient and measure slots
    #[serde(flatten)]
    pub slots: HashMap<String, Value>,
}

impl MealDetail {
    fn slot(&self, prefix: &str, index: usize) -> Option<&str> {
        self.slots
            .get(&format!("{}{}", prefix, index))
            .and_then(Value::as_str)
    }

    /// `(strIngredientN, strMeasureN)` for N = 1..=20
    pub fn ingredient_slots(&self) -> impl Iterator<Item = (Option<&str>, Option<&str>)> + '_ {
        (1..=MAX_INGREDIENT_SLOTS)
            .map(move |n| (self.slot("strIngredient", n), self.slot("strMeasure", n)))
    }
}

#[derive(Clone)]
pub struct MealDbClient {
    http: reqwest::Client,
    base_url: String,
}

impl MealDbClient {
    pub fn new(config: &MealDbConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn filter_by_ingredient(&self, ingredient: &str) -> reqwest::Result<Vec<MealSummary>> {
        self.filter("i", ingredient).await
    }

    pub async fn filter_by_area(&self, area: &str) -> reqwest::Result<Vec<MealSummary>> {
        self.filter("a", area).await
    }

    pub async fn filter_by_category(&self, category: &str) -> reqwest::Result<Vec<MealSummary>> {
        self.filter("c", category).await
    }

    async fn filter(&self, key: &str, value: &str) -> reqwest::Result<Vec<MealSummary>> {
        debug!(key, value, "MealDB filter");
        let started = Instant::now();
        let result = self
            .get::<MealSummary>("filter.php", &[(key, value)])
            .await;
        record_call("mealdb", "filter", started, &result);
        result
    }

    /// Full meal by id, `None` when MealDB knows no such meal
    pub async fn lookup(&self, id: &str) -> reqwest::Result<Option<MealDetail>> {
        let started = Instant::now();
        let result = self.get::<MealDetail>("lookup.php", &[("i", id)]).await;
        record_call("mealdb", "lookup", started, &result);
        Ok(result?.into_iter().next())
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> reqwest::Result<Vec<T>> {
        let list = self
            .http
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json::<MealList<T>>()
            .await?;

        Ok(list.meals.unwrap_or_default())
    }
}
