pub mod client;

pub use client::{GooglePlacesClient, PlacesConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Top-ranked match for a free-text place query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub place_id: String,
    pub coordinates: Coordinates,
}

/// Outcome of a place lookup.
///
/// A provider that answers but has nothing to offer is `NotFound`, not an
/// error, so a failed lookup never aborts a larger batch.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceResult {
    Found(Place),
    NotFound,
}

/// The provider could not be asked at all (network, TLS, undecodable body).
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("failed to reach places provider: {0}")]
    Transport(String),

    #[error("failed to decode places response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait PlaceResolver: Send + Sync {
    async fn resolve(&self, query: &str) -> Result<PlaceResult, PlacesError>;
}
