use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("{0} is set but empty")]
    Empty(&'static str),
}

/// Process configuration, read once at startup from the environment.
///
/// Both provider keys are required; a missing key fails startup instead of
/// the first request.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub gemini_api_key: Secret<String>,
    pub google_maps_api_key: Secret<String>,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,
    #[serde(default = "default_places_base_url")]
    pub places_base_url: String,

    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// `json` for one JSON object per line, anything else for the human format.
    #[serde(default)]
    pub log_format: String,
}

fn default_gemini_model() -> String {
    generate::llm::DEFAULT_MODEL.to_string()
}

fn default_gemini_base_url() -> String {
    generate::llm::GEMINI_API_BASE.to_string()
}

fn default_places_base_url() -> String {
    places::client::PLACES_API_BASE.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from an explicit variable map instead of the process environment.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::load(Some(vars))
    }

    fn load(vars: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .source(vars)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("allowed_origins"),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini_api_key.expose_secret().trim().is_empty() {
            return Err(ConfigError::Empty("GEMINI_API_KEY"));
        }
        if self.google_maps_api_key.expose_secret().trim().is_empty() {
            return Err(ConfigError::Empty("GOOGLE_MAPS_API_KEY"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn gemini_config(&self) -> generate::GeminiConfig {
        generate::GeminiConfig {
            api_key: self.gemini_api_key.expose_secret().clone(),
            model: self.gemini_model.clone(),
            base_url: self.gemini_base_url.clone(),
            timeout: self.request_timeout(),
        }
    }

    pub fn places_config(&self) -> places::PlacesConfig {
        places::PlacesConfig {
            api_key: self.google_maps_api_key.expose_secret().clone(),
            base_url: self.places_base_url.clone(),
            timeout: self.request_timeout(),
        }
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
