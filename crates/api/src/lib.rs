pub mod config;
pub mod error;
pub mod frontend;
pub mod handlers;
pub mod metrics;
pub mod recipe;
pub mod request_id;

use axum::{
    Router,
    http::{HeaderValue, Request},
    middleware::from_fn,
    routing::{get, post},
};
use generate::StructuredGenerator;
use pipeline::SupplyChainPipeline;
use places::PlaceResolver;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::metrics::Metrics;
use crate::request_id::{REQUEST_ID_HEADER, request_id_middleware};

/// Shared application state: provider clients built once at startup.
pub struct AppState {
    pub pipeline: SupplyChainPipeline,
    pub generator: Arc<dyn StructuredGenerator>,
    pub resolver: Arc<dyn PlaceResolver>,
    pub metrics: Arc<Metrics>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn StructuredGenerator>,
        resolver: Arc<dyn PlaceResolver>,
        static_dir: PathBuf,
    ) -> Self {
        Self {
            pipeline: SupplyChainPipeline::new(generator.clone(), resolver.clone()),
            generator,
            resolver,
            metrics: Metrics::new(),
            static_dir,
        }
    }
}

pub fn build_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    let mut app = Router::new()
        .route("/api/hello", get(handlers::hello))
        .route("/api/stats", get(handlers::stats))
        .route("/api/supply-chain", post(handlers::supply_chain))
        .route("/api/generate-recipe", post(handlers::generate_recipe))
        .route("/api/get-coords", post(handlers::get_coords));

    let assets_dir = state.static_dir.join("assets");
    if assets_dir.is_dir() {
        app = app.nest_service("/assets", ServeDir::new(assets_dir));
    }

    app.fallback(frontend::serve_frontend)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
}
