use thiserror::Error;

use crate::entities::{MapPoint, Place};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodingError {
    #[error("Geocoding request failed: {0}")]
    Request(String),
    #[error("Unexpected geocoding response: {0}")]
    Response(String),
}

/// Resolves coordinates to addresses and free text to places.
pub trait GeocodingGateway {
    /// Returns `Ok(None)` if the service does not know an address
    /// for the given position.
    fn reverse(&self, pos: MapPoint) -> Result<Option<String>, GeocodingError>;

    /// Returns the hits ordered by relevance.
    fn search(&self, query: &str) -> Result<Vec<Place>, GeocodingError>;
}
