//! Tasty client (RapidAPI)

use super::record_call;
use crate::config::TastyConfig;
use anyhow::Result;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::debug;

const KEY_HEADER: &str = "X-RapidAPI-Key";
const HOST_HEADER: &str = "X-RapidAPI-Host";

#[derive(Debug, Deserialize)]
struct TastyListResponse {
    #[serde(default)]
    results: Option<Vec<TastyRecipe>>,
}

/// Recipe as returned by both `recipes/list` and `recipes/get-more-info`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TastyRecipe {
    #[serde(default)]
    pub canonical_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub instructions: Option<Vec<TastyInstruction>>,
    #[serde(default)]
    pub sections: Option<Vec<TastySection>>,
    #[serde(default)]
    pub tags: Option<Vec<TastyTag>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TastyInstruction {
    #[serde(default)]
    pub display_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TastySection {
    #[serde(default)]
    pub components: Option<Vec<TastyComponent>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TastyComponent {
    #[serde(default)]
    pub ingredient: Option<TastyIngredient>,
    #[serde(default)]
    pub measurements: Option<Vec<TastyMeasurement>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TastyIngredient {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TastyMeasurement {
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub unit: Option<TastyUnit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TastyUnit {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TastyTag {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub tag_type: Option<String>,
}

impl TastyRecipe {
    /// Components of every section, in order
    pub fn components(&self) -> impl Iterator<Item = &TastyComponent> {
        self.sections
            .iter()
            .flatten()
            .flat_map(|section| section.components.iter().flatten())
    }

    /// Names of tags of the given type (`cuisine`, `dietary`, ...)
    pub fn tag_names<'a>(&'a self, tag_type: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tags
            .iter()
            .flatten()
            .filter(move |tag| {
                tag.tag_type
                    .as_deref()
                    .is_some_and(|t| t.eq_ignore_ascii_case(tag_type))
            })
            .filter_map(|tag| tag.name.as_deref())
    }
}

#[derive(Clone)]
pub struct TastyClient {
    http: reqwest::Client,
    base_url: String,
    host: String,
    api_key: Secret<String>,
    page_size: u32,
}

impl TastyClient {
    pub fn new(config: &TastyConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            host: config.host.clone(),
            api_key: config.api_key(),
            page_size: config.page_size,
        })
    }

    fn request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        self.http
            .get(format!("{}/{}", self.base_url, endpoint))
            .header(KEY_HEADER, self.api_key.expose_secret().as_str())
            .header(HOST_HEADER, self.host.as_str())
    }

    /// First page of `recipes/list` for a free-text query
    pub async fn list_recipes(&self, query: &str) -> reqwest::Result<Vec<TastyRecipe>> {
        debug!(query, "Tasty recipe list");
        let started = Instant::now();
        let result = self.fetch_list(query).await;
        record_call("tasty", "list", started, &result);

        Ok(result?.results.unwrap_or_default())
    }

    async fn fetch_list(&self, query: &str) -> reqwest::Result<TastyListResponse> {
        let size = self.page_size.to_string();
        self.request("recipes/list")
            .query(&[("from", "0"), ("size", size.as_str()), ("q", query)])
            .send()
            .await?
            .error_for_status()?
            .json::<TastyListResponse>()
            .await
    }

    /// `recipes/get-more-info`, `None` when Tasty reports no such recipe
    pub async fn recipe_info(&self, id: &str) -> reqwest::Result<Option<TastyRecipe>> {
        let started = Instant::now();
        let result = self.fetch_info(id).await;
        record_call("tasty", "info", started, &result);
        result
    }

    async fn fetch_info(&self, id: &str) -> reqwest::Result<Option<TastyRecipe>> {
        let response = self
            .request("recipes/get-more-info")
            .query(&[("id", id)])
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        response
            .error_for_status()?
            .json::<Option<TastyRecipe>>()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TastyClient {
        TastyClient::new(&TastyConfig {
            base_url: server.uri(),
            host: "tasty.p.rapidapi.com".to_string(),
            api_key: "test-key".to_string(),
            page_size: 50,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_sends_rapidapi_headers_and_paging() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes/list"))
            .and(query_param("from", "0"))
            .and(query_param("size", "50"))
            .and(query_param("q", "tofu"))
            .and(header("X-RapidAPI-Key", "test-key"))
            .and(header("X-RapidAPI-Host", "tasty.p.rapidapi.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 1,
                "results": [{"canonical_id": "recipe:42", "name": "Tofu Bowl"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let recipes = client_for(&server).list_recipes("tofu").await.unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name.as_deref(), Some("Tofu Bowl"));
    }

    #[tokio::test]
    async fn test_missing_results_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0})))
            .mount(&server)
            .await;

        assert!(client_for(&server).list_recipes("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_info_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes/get-more-info"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(client_for(&server).recipe_info("1").await.unwrap().is_none());
    }

    #[test]
    fn test_tag_and_component_helpers() {
        let recipe: TastyRecipe = serde_json::from_value(json!({
            "tags": [
                {"name": "mexican", "type": "cuisine"},
                {"name": "vegan", "type": "dietary"},
                {"name": "gluten_free", "type": "Dietary"}
            ],
            "sections": [
                {"components": [{"ingredient": {"name": "Black beans"}}]},
                {"components": null}
            ]
        }))
        .unwrap();

        let dietary: Vec<_> = recipe.tag_names("dietary").collect();
        assert_eq!(dietary, vec!["vegan", "gluten_free"]);
        assert_eq!(recipe.components().count(), 1);
    }
}
