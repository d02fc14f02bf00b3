use std::time::Duration;

use geopin_boundary::{ReverseResponse, SearchHit};
use geopin_core::{
    entities::{MapPoint, Place},
    gateways::geocode::{GeocodingError, GeocodingGateway},
};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::blocking::{Client, Response};

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = concat!("geopin/", env!("CARGO_PKG_VERSION"));

const TIMEOUT: Duration = Duration::from_secs(10);

/// Geocoding based on the OpenStreetMap Nominatim API.
#[derive(Debug, Clone)]
pub struct Nominatim {
    base_url: String,
    client: Client,
}

impl Nominatim {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(TIMEOUT)
            .build()
            .map_err(|err| GeocodingError::Request(err.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn reverse_url(&self, pos: MapPoint) -> String {
        let Self { base_url, .. } = self;
        format!(
            "{base_url}/reverse?format=json&lon={}&lat={}",
            pos.lng(),
            pos.lat()
        )
    }

    fn search_url(&self, query: &str) -> String {
        let Self { base_url, .. } = self;
        let encoded_query = utf8_percent_encode(query, NON_ALPHANUMERIC);
        format!("{base_url}/search?format=json&q={encoded_query}")
    }

    fn get(&self, url: &str) -> Result<Response, GeocodingError> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| GeocodingError::Request(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::Response(format!("HTTP status {status}")));
        }
        Ok(response)
    }
}

impl GeocodingGateway for Nominatim {
    fn reverse(&self, pos: MapPoint) -> Result<Option<String>, GeocodingError> {
        let url = self.reverse_url(pos);
        let response: ReverseResponse = self
            .get(&url)?
            .json()
            .map_err(|err| GeocodingError::Response(err.to_string()))?;
        if let Some(err) = &response.error {
            log::debug!("No address for {pos}: {err}");
        }
        Ok(response.into_address())
    }

    fn search(&self, query: &str) -> Result<Vec<Place>, GeocodingError> {
        let url = self.search_url(query);
        let hits: Vec<SearchHit> = self
            .get(&url)?
            .json()
            .map_err(|err| GeocodingError::Response(err.to_string()))?;
        log::debug!("Found {} hit(s) for '{query}'", hits.len());
        Ok(hits_into_places(hits))
    }
}

/// Skips hits with unusable coordinates, keeping the order.
fn hits_into_places(hits: Vec<SearchHit>) -> Vec<Place> {
    hits.into_iter()
        .filter_map(|hit| {
            let name = hit.display_name.clone();
            Place::try_from(hit)
                .map_err(|err| log::warn!("Ignoring search hit '{name}': {err}"))
                .ok()
        })
        .collect()
}
