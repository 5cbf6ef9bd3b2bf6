use anyhow::Context;
use api::config::AppConfig;
use api::{AppState, build_router};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Missing provider keys stop the process here, not on first use
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    if config.json_logs() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Provider clients
    let generator = generate::GeminiClient::new(config.gemini_config())
        .context("Failed to create Gemini client")?;
    let resolver = places::GooglePlacesClient::new(config.places_config())
        .context("Failed to create Places client")?;

    tracing::info!(model = %generator.model(), "Configured generation provider");

    let state = Arc::new(AppState::new(
        Arc::new(generator),
        Arc::new(resolver),
        config.static_dir.clone(),
    ));

    if !state.static_dir.is_dir() {
        tracing::warn!(
            static_dir = %state.static_dir.display(),
            "Static directory not found, only API routes will be useful"
        );
    }

    let app = build_router(state, &config.allowed_origins);

    // Start server
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;

    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
