use axum::{
    Json,
    extract::{Query, State},
};
use places::{Place, PlaceResult};
use pipeline::SupplyChainResponse;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;
use crate::error::ApiError;
use crate::metrics::{MetricsSnapshot, TimedOperation};
use crate::recipe::{self, Recipe, RecipeRequest};

#[derive(Serialize)]
pub struct HelloResponse {
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductParams {
    #[serde(default)]
    pub product_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub company_name: String,
    #[serde(default)]
    pub city: String,
}

pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from the supply-chain backend".to_string(),
    })
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

/// `POST /api/supply-chain?product_name=...`, or the same field in a JSON body.
pub async fn supply_chain(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProductParams>,
    body: Option<Json<ProductParams>>,
) -> Result<Json<SupplyChainResponse>, ApiError> {
    let product_name = params
        .product_name
        .or_else(|| body.and_then(|Json(b)| b.product_name))
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("product_name is required".to_string()))?;

    let timer = TimedOperation::start();
    let result = state.pipeline.run(&product_name).await;
    state.metrics.record_request(result.is_ok());

    let response = result?;
    let resolved = response.supply_chain.iter().filter(|n| n.found).count();
    state.metrics.record_supply_chain(
        timer.elapsed(),
        resolved,
        response.supply_chain.len() - resolved,
    );

    Ok(Json(response))
}

pub async fn generate_recipe(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecipeRequest>,
) -> Result<Json<Recipe>, ApiError> {
    if request.ingredients.iter().all(|i| i.trim().is_empty()) {
        return Err(ApiError::BadRequest("at least one ingredient is required".to_string()));
    }

    let timer = TimedOperation::start();
    let prompt = recipe::build_recipe_prompt(&request);
    let result: Result<Recipe, _> =
        generate::generate_structured(state.generator.as_ref(), &prompt, &recipe::recipe_schema()).await;
    state.metrics.record_request(result.is_ok());

    let recipe = result?;
    state.metrics.record_recipe(timer.elapsed());
    tracing::info!(title = %recipe.title, "Generated recipe");

    Ok(Json(recipe))
}

/// Look up a single company. Provider errors are logged and reported the
/// same way as an empty search.
pub async fn get_coords(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LocationRequest>,
) -> Result<Json<Place>, ApiError> {
    let company = request.company_name.trim();
    if company.is_empty() {
        return Err(ApiError::BadRequest("company_name is required".to_string()));
    }

    let query = format!("{} {}", company, request.city.trim()).trim().to_string();

    let timer = TimedOperation::start();
    let outcome = match state.resolver.resolve(&query).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(query = %query, error = %e, "Place lookup failed");
            PlaceResult::NotFound
        }
    };
    state.metrics.record_lookup(timer.elapsed());

    match outcome {
        PlaceResult::Found(place) => {
            state.metrics.record_request(true);
            Ok(Json(place))
        }
        PlaceResult::NotFound => {
            state.metrics.record_request(false);
            Err(ApiError::NotFound("Location not found".to_string()))
        }
    }
}
