use gloo_net::http::Request;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use geopin_boundary::{ReverseResponse, SearchHit};

use crate::{into_json, Result};

/// Nominatim geocoding API, called from the browser.
#[derive(Debug, Clone)]
pub struct NominatimApi {
    url: String,
}

impl NominatimApi {
    #[must_use]
    pub fn new(url: &str) -> Self {
        let url = url.trim_end_matches('/').to_string();
        Self { url }
    }

    /// Address of the given position, `None` if the service knows none.
    pub async fn reverse(&self, lat: f64, lng: f64) -> Result<Option<String>> {
        let url = format!("{}/reverse?format=json&lon={lng}&lat={lat}", self.url);
        let response = Request::get(&url).send().await?;
        let response: ReverseResponse = into_json(response).await?;
        Ok(response.into_address())
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let encoded_query = utf8_percent_encode(query, NON_ALPHANUMERIC);
        let url = format!("{}/search?format=json&q={encoded_query}", self.url);
        let response = Request::get(&url).send().await?;
        into_json(response).await
    }
}
