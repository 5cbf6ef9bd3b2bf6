use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::{Coordinates, Place, PlaceResolver, PlaceResult, PlacesError};

pub const PLACES_API_BASE: &str = "https://maps.googleapis.com";

#[derive(Debug, Clone)]
pub struct PlacesConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl PlacesConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: PLACES_API_BASE.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Clone)]
pub struct GooglePlacesClient {
    config: PlacesConfig,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<TextSearchResult>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct TextSearchResult {
    #[serde(default)]
    name: String,
    #[serde(default)]
    formatted_address: String,
    #[serde(default)]
    place_id: String,
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: Coordinates,
}

impl GooglePlacesClient {
    pub fn new(config: PlacesConfig) -> Result<Self, PlacesError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PlacesError::Transport(e.to_string()))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl PlaceResolver for GooglePlacesClient {
    async fn resolve(&self, query: &str) -> Result<PlaceResult, PlacesError> {
        let url = format!(
            "{}/maps/api/place/textsearch/json",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .get(&url)
            .query(&[("query", query), ("key", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| PlacesError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            tracing::warn!(query, status = %response.status(), "Places request failed");
            return Ok(PlaceResult::NotFound);
        }

        let search: TextSearchResponse = response
            .json()
            .await
            .map_err(|e| PlacesError::Decode(e.to_string()))?;

        if search.status != "OK" {
            tracing::debug!(
                query,
                status = %search.status,
                error = search.error_message.as_deref().unwrap_or(""),
                "Places search returned no match"
            );
            return Ok(PlaceResult::NotFound);
        }

        Ok(match search.results.into_iter().next() {
            Some(top) => PlaceResult::Found(Place {
                name: top.name,
                address: top.formatted_address,
                place_id: top.place_id,
                coordinates: top.geometry.location,
            }),
            None => PlaceResult::NotFound,
        })
    }
}
